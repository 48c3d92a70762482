//! 標準サブプロセス実行（std::process::Command を委譲）

use crate::error::Error;
use crate::ports::outbound::{ChildProcess, LaunchSpec, Process};
use std::io::Read;
use std::process::{Child, ChildStderr, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 終了済みの子の stderr が閉じるのを待つ上限。子孫がパイプを握っていてもこれ以上は待たない。
const STDERR_DRAIN_WAIT: Duration = Duration::from_millis(500);

/// 標準ライブラリの Command を使う Process 実装
///
/// stdout は捨て、stderr をパイプで捕捉する。stderr は別スレッドで読み続ける。
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

impl Process for StdProcess {
    fn spawn(&self, spec: &LaunchSpec) -> Result<Box<dyn ChildProcess>, Error> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        for (k, v) in &spec.env {
            cmd.env(k, v);
        }
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }
        let mut child = cmd.spawn().map_err(|e| {
            Error::io_msg(format!("Failed to execute '{}': {}", spec.program, e))
        })?;
        let stderr = child.stderr.take().map(StderrCapture::start);
        Ok(Box::new(StdChild {
            child,
            stderr,
            reaped: false,
        }))
    }
}

/// stderr を読み切るまでバッファに溜めるスレッド。読み終えたら `done` に通知する。
struct StderrCapture {
    buf: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl StderrCapture {
    fn start(mut pipe: ChildStderr) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();
        let sink = Arc::clone(&buf);
        std::thread::spawn(move || {
            let mut chunk = [0u8; 4096];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if let Ok(mut b) = sink.lock() {
                            b.extend_from_slice(&chunk[..n]);
                        }
                    }
                }
            }
            let _ = tx.send(());
        });
        Self { buf, done }
    }

    /// EOF を最大 `wait` だけ待ち、その時点までに読めた分を返す
    fn collect(self, wait: Duration) -> String {
        let _ = self.done.recv_timeout(wait);
        let bytes = match self.buf.lock() {
            Ok(mut b) => std::mem::take(&mut *b),
            Err(_) => Vec::new(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// std::process::Child のラッパー。drop 時に実行中なら kill する。
struct StdChild {
    child: Child,
    stderr: Option<StderrCapture>,
    reaped: bool,
}

impl ChildProcess for StdChild {
    fn try_wait(&mut self) -> Result<Option<i32>, Error> {
        let status = self
            .child
            .try_wait()
            .map_err(|e| Error::io_msg(format!("Failed to poll child process: {}", e)))?;
        if status.is_some() {
            self.reaped = true;
        }
        Ok(status.map(|s| s.code().unwrap_or(-1)))
    }

    fn take_diagnostics(&mut self) -> String {
        self.stderr
            .take()
            .map(|c| c.collect(STDERR_DRAIN_WAIT))
            .unwrap_or_default()
    }

    fn terminate(&mut self) -> Result<(), Error> {
        if self.reaped {
            return Ok(());
        }
        // kill は既に終了している場合 InvalidInput を返すので無視する
        let _ = self.child.kill();
        self.child
            .wait()
            .map_err(|e| Error::io_msg(format!("Failed to reap child process: {}", e)))?;
        self.reaped = true;
        Ok(())
    }
}

impl Drop for StdChild {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
