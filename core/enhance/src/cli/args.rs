use crate::domain::EnhanceCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

/// -r 省略時の改善対象ディレクトリ
pub const DEFAULT_ROOT: &str = "todo_app/app";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --no-interactive: 確認にはすべて "n" と答え、CI 等でブロックしない
    pub non_interactive: bool,
    pub root: Option<PathBuf>,
    pub instructions: Option<String>,
    /// -c / --config: 設定ファイル（省略時はホームディレクトリ配下）
    pub config_path: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub scaffold: Option<PathBuf>,
    pub into: Option<PathBuf>,
    /// -i を使わずに並べた改善指示の単語
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("enhance")
        .about("Improve each source file of a project with an LLM, confirming every change")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Answer 'n' to every confirmation (CI-friendly)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("root")
                .short('r')
                .long("root")
                .value_name("dir")
                .help("Directory holding the sources to improve (default: todo_app/app)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("instructions")
                .short('i')
                .long("instructions")
                .value_name("text")
                .help("Improvements to apply (asked interactively when omitted)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .value_name("file")
                .help("Settings file (default: $ENHANCE_HOME/config/enhance.json)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("provider")
                .help("LLM provider (openai, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gpt-4)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("scaffold")
                .long("scaffold")
                .value_name("manifest")
                .help("Write the project structure described by a JSON manifest and exit")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("into")
                .long("into")
                .value_name("dir")
                .help("Destination directory for --scaffold (default: .)")
                .value_parser(value_parser!(PathBuf))
                .requires("scaffold")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Improvement instructions as plain words")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        non_interactive: matches.get_flag("no-interactive"),
        root: matches.get_one::<PathBuf>("root").cloned(),
        instructions: matches.get_one::<String>("instructions").cloned(),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        provider: matches.get_one::<String>("provider").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        scaffold: matches.get_one::<PathBuf>("scaffold").cloned(),
        into: matches.get_one::<PathBuf>("into").cloned(),
        message_args: matches
            .get_many::<String>("positional")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "enhance", &mut std::io::stdout());
}

/// Config を EnhanceCommand に変換する
///
/// -i と単語の両方で指示を与えるのは曖昧なので usage エラー。
pub fn config_to_command(config: Config) -> Result<EnhanceCommand, Error> {
    if config.help {
        return Ok(EnhanceCommand::Help);
    }

    if let Some(manifest) = config.scaffold {
        if !config.message_args.is_empty() {
            return Err(Error::invalid_argument(
                "--scaffold does not take improvement instructions",
            ));
        }
        return Ok(EnhanceCommand::Scaffold {
            manifest,
            into: config.into.unwrap_or_else(|| PathBuf::from(".")),
        });
    }

    let words = config.message_args.join(" ");
    let instructions = match (config.instructions, words.trim().is_empty()) {
        (Some(_), false) => {
            return Err(Error::invalid_argument(
                "Give instructions either with -i/--instructions or as words, not both",
            ))
        }
        (Some(i), true) => Some(i),
        (None, false) => Some(words),
        (None, true) if config.non_interactive => {
            return Err(Error::invalid_argument(
                "--no-interactive requires instructions (-i/--instructions)",
            ))
        }
        (None, true) => None,
    };
    Ok(EnhanceCommand::Enhance {
        root: config.root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
        instructions,
    })
}
