use crate::adapter::FsSourceEnumerator;
use crate::domain::UnitRules;
use crate::tests::support::{MemFs, ScriptedCompletion, ScriptedProcess, ScriptedPrompt};
use crate::usecase::chat_session::ChatSession;
use crate::usecase::enhance_all::EnhanceUseCase;
use crate::usecase::patch_loop::{Ceilings, PatchLoop, PatchLoopDeps};
use crate::usecase::verify::LaunchVerifier;
use common::adapter::NoopLog;
use common::error::Error;
use common::ports::outbound::LaunchSpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

fn rules() -> UnitRules {
    UnitRules {
        extension: "py".to_string(),
        main_marker: "main".to_string(),
        exclude_marker: "database".to_string(),
    }
}

fn use_case(
    fs: &Arc<MemFs>,
    prompt: &Arc<ScriptedPrompt>,
    process: &Arc<ScriptedProcess>,
    confirm: usize,
) -> EnhanceUseCase {
    let verifier = LaunchVerifier::new(
        process.clone(),
        Arc::new(NoopLog),
        LaunchSpec::new("uvicorn"),
        Duration::ZERO,
    );
    let patch_loop = PatchLoop::new(
        PatchLoopDeps {
            prompt: prompt.clone(),
            fs: fs.clone(),
            verifier,
            log: Arc::new(NoopLog),
        },
        Ceilings {
            confirm,
            diagnose: 2,
        },
    );
    EnhanceUseCase::new(
        Arc::new(FsSourceEnumerator::new(fs.clone(), Arc::new(NoopLog), rules())),
        patch_loop,
        prompt.clone(),
        Arc::new(NoopLog),
    )
}

fn session(completion: &Arc<ScriptedCompletion>) -> ChatSession {
    ChatSession::new(completion.clone(), Arc::new(NoopLog), 10).with_retry_policy(3, Duration::ZERO)
}

#[test]
fn test_main_unit_is_processed_last() {
    let fs = Arc::new(MemFs::with_files(&[
        ("root/app_main.py", "<text2>"),
        ("root/helpers.py", "<text1>"),
        ("root/database.py", "<db>"),
    ]));
    let prompt = Arc::new(ScriptedPrompt::new(&[]));
    let process = Arc::new(ScriptedProcess::new(vec![]));
    let completion = Arc::new(ScriptedCompletion::always("x = 1"));

    let summary = use_case(&fs, &prompt, &process, 1)
        .run(&mut session(&completion), Path::new("root"), "improve")
        .unwrap();

    let improving: Vec<String> = prompt
        .said()
        .into_iter()
        .filter(|s| s.starts_with("==> Improving"))
        .collect();
    assert_eq!(
        improving,
        vec![
            "==> Improving root/helpers.py".to_string(),
            "==> Improving root/app_main.py".to_string(),
        ]
    );
    assert!(summary.done.is_empty());
    assert_eq!(
        summary.abandoned,
        vec![PathBuf::from("root/helpers.py"), PathBuf::from("root/app_main.py")]
    );
    assert_eq!(fs.content("root/database.py").as_deref(), Some("<db>"));
}

#[test]
fn test_abandoned_file_does_not_stop_the_run() {
    let fs = Arc::new(MemFs::with_files(&[
        ("root/main.py", "app = 0"),
        ("root/models.py", "m = 0"),
    ]));
    // models.py は 2 回とも却下、main.py は承認
    let prompt = Arc::new(ScriptedPrompt::new(&["n", "n", "y"]));
    let process = Arc::new(ScriptedProcess::new(vec![None]));
    let completion = Arc::new(ScriptedCompletion::new(
        vec![
            Ok("m = 1".to_string()),
            Ok("m = 2".to_string()),
            Ok("app = 1".to_string()),
        ],
        "unused",
    ));

    let summary = use_case(&fs, &prompt, &process, 2)
        .run(&mut session(&completion), Path::new("root"), "improve")
        .unwrap();

    assert_eq!(summary.abandoned, vec![PathBuf::from("root/models.py")]);
    assert_eq!(summary.done, vec![PathBuf::from("root/main.py")]);
    assert_eq!(fs.content("root/models.py").as_deref(), Some("m = 0"));
    assert_eq!(fs.content("root/main.py").as_deref(), Some("app = 1"));
    assert_eq!(fs.writes().len(), 1);

    // 共有されるのは履歴だけ: main.py の依頼には models.py のやり取りが前置される
    let requests = completion.requests();
    assert_eq!(requests[2].len(), 5);
    assert!(prompt
        .said()
        .last()
        .is_some_and(|s| s.contains("1 file(s) improved, 1 file(s) abandoned")));
}

#[test]
fn test_missing_main_unit_is_fatal() {
    let fs = Arc::new(MemFs::with_files(&[("root/helpers.py", "x = 1")]));
    let prompt = Arc::new(ScriptedPrompt::new(&[]));
    let process = Arc::new(ScriptedProcess::new(vec![]));
    let completion = Arc::new(ScriptedCompletion::always("unused"));

    let err = use_case(&fs, &prompt, &process, 5)
        .run(&mut session(&completion), Path::new("root"), "improve")
        .unwrap_err();

    assert!(matches!(err, Error::MissingMainUnit { .. }));
    assert_eq!(completion.call_count(), 0);
    assert!(prompt.questions().is_empty());
}

#[test]
fn test_unreadable_file_is_abandoned_and_run_continues() {
    let fs = Arc::new(MemFs::with_files(&[
        ("root/main.py", "app = 0"),
        ("root/helpers.py", "garbage"),
    ]));
    fs.mark_unreadable("root/helpers.py");
    let prompt = Arc::new(ScriptedPrompt::new(&["y"]));
    let process = Arc::new(ScriptedProcess::new(vec![None]));
    let completion = Arc::new(ScriptedCompletion::always("app = 1"));

    let summary = use_case(&fs, &prompt, &process, 2)
        .run(&mut session(&completion), Path::new("root"), "improve")
        .unwrap();

    assert_eq!(summary.abandoned, vec![PathBuf::from("root/helpers.py")]);
    assert_eq!(summary.done, vec![PathBuf::from("root/main.py")]);
    assert_eq!(completion.call_count(), 1);
    let said = prompt.said();
    assert!(said
        .iter()
        .any(|s| s.starts_with("Skipping root/helpers.py: ") && s.contains("UTF-8")));
    assert!(said
        .last()
        .is_some_and(|s| s.contains("1 file(s) improved, 1 file(s) abandoned")));
}
