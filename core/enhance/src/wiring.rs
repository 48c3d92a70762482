//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::Path;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileSystem, Process, StderrLog, StdEnvResolver, StdFileSystem, StdProcess, TeeLog,
};
use common::error::Error;
use common::llm::{create_driver, ProviderOptions, ProviderType};
use common::ports::outbound::{EnvResolver, Log, LogLevel, LogRecord};

use crate::adapter::{
    load_settings, CliHumanPrompt, DriverChatCompletion, FsSourceEnumerator, NonInteractivePrompt,
};
use crate::cli::Config;
use crate::domain::EnhanceSettings;
use crate::ports::outbound::{ChatCompletion, HumanPrompt};
use crate::usecase::chat_session::ChatSession;
use crate::usecase::enhance_all::EnhanceUseCase;
use crate::usecase::patch_loop::{Ceilings, PatchLoop, PatchLoopDeps};
use crate::usecase::scaffold::ScaffoldUseCase;
use crate::usecase::verify::LaunchVerifier;

/// 配線済みのアプリケーション
///
/// ChatSession と EnhanceUseCase はコマンドごとに組み立てる（root が決まってから）。
pub struct App {
    pub logger: Arc<dyn Log>,
    pub prompt: Arc<dyn HumanPrompt>,
    pub settings: EnhanceSettings,
    pub scaffold_use_case: ScaffoldUseCase,
    fs: Arc<dyn FileSystem>,
    process: Arc<dyn Process>,
    env_resolver: Arc<dyn EnvResolver>,
    provider: ProviderType,
}

impl App {
    /// 設定に従ってリモート補完を作り、空の履歴を持つセッションを返す
    pub fn new_session(&self) -> Result<ChatSession, Error> {
        if self.provider == ProviderType::OpenAi {
            if let Some(name) = &self.settings.api_key_env {
                if self.env_resolver.var(name).is_none() {
                    return Err(Error::config(format!(
                        "environment variable {} is not set",
                        name
                    )));
                }
            }
        }
        let options = ProviderOptions {
            model: self.settings.model.clone(),
            base_url: self.settings.base_url.clone(),
            api_key_env: self.settings.api_key_env.clone(),
            temperature: self.settings.temperature,
        };
        let driver = create_driver(self.provider, options)?;
        let completion: Arc<dyn ChatCompletion> =
            Arc::new(DriverChatCompletion::new(driver, Arc::clone(&self.logger)));
        Ok(ChatSession::new(
            completion,
            Arc::clone(&self.logger),
            self.settings.history_capacity,
        )
        .with_retry_policy(self.settings.max_retries, self.settings.retry_delay()))
    }

    /// root 配下を改善するユースケースを組み立てる
    pub fn enhance_use_case(&self, root: &Path) -> EnhanceUseCase {
        let launch = &self.settings.launch;
        let current = launch
            .prepend_root_to
            .as_deref()
            .and_then(|name| self.env_resolver.var(name));
        let verifier = LaunchVerifier::new(
            Arc::clone(&self.process),
            Arc::clone(&self.logger),
            launch.to_spec(root, current),
            launch.grace(),
        );
        let patch_loop = PatchLoop::new(
            PatchLoopDeps {
                prompt: Arc::clone(&self.prompt),
                fs: Arc::clone(&self.fs),
                verifier,
                log: Arc::clone(&self.logger),
            },
            Ceilings {
                confirm: self.settings.confirm_ceiling,
                diagnose: self.settings.diagnose_ceiling,
            },
        );
        let enumerator = Arc::new(FsSourceEnumerator::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.logger),
            self.settings.unit_rules(),
        ));
        EnhanceUseCase::new(
            enumerator,
            patch_loop,
            Arc::clone(&self.prompt),
            Arc::clone(&self.logger),
        )
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_enhance(config: &Config) -> Result<App, Error> {
    let prompt: Arc<dyn HumanPrompt> = if config.non_interactive {
        Arc::new(NonInteractivePrompt::new())
    } else {
        Arc::new(CliHumanPrompt::new())
    };
    wire_enhance_with(
        config,
        Arc::new(StdEnvResolver),
        Arc::new(StdFileSystem),
        Arc::new(StdProcess),
        prompt,
    )
}

/// 外界アダプタを差し替えて App を組み立てる
pub fn wire_enhance_with(
    config: &Config,
    env_resolver: Arc<dyn EnvResolver>,
    fs: Arc<dyn FileSystem>,
    process: Arc<dyn Process>,
    prompt: Arc<dyn HumanPrompt>,
) -> Result<App, Error> {
    let file_log: Arc<dyn Log> =
        Arc::new(FileJsonLog::new(Arc::clone(&fs), env_resolver.resolve_log_path()?));
    let logger: Arc<dyn Log> = if config.verbose {
        let sinks: Vec<Arc<dyn Log>> = vec![file_log, Arc::new(StderrLog)];
        Arc::new(TeeLog::new(sinks))
    } else {
        file_log
    };

    let config_path = match &config.config_path {
        Some(p) => p.clone(),
        None => env_resolver.resolve_config_path()?,
    };
    let mut settings = load_settings(fs.as_ref(), logger.as_ref(), &config_path)?;

    let provider = match &config.provider {
        Some(name) => ProviderType::from_str(name).ok_or_else(|| {
            Error::invalid_argument(format!("Unknown provider '{}' (openai, echo)", name))
        })?,
        None => ProviderType::from_str(&settings.provider).ok_or_else(|| {
            Error::config(format!("Unknown provider '{}' (openai, echo)", settings.provider))
        })?,
    };
    if let Some(model) = &config.model {
        settings.model = Some(model.clone());
    }

    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "wiring", "lifecycle", "app wired")
            .field("config", config_path.display().to_string())
            .field("provider", provider.as_str())
            .field("non_interactive", config.non_interactive),
    );

    let scaffold_use_case = ScaffoldUseCase::new(Arc::clone(&fs), Arc::clone(&logger));
    Ok(App {
        logger,
        prompt,
        settings,
        scaffold_use_case,
        fs,
        process,
        env_resolver,
        provider,
    })
}
