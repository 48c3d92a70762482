mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::EnhanceCommand;
use ports::inbound::UseCaseRunner;
use std::process;
use wiring::{wire_enhance, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
pub(crate) struct Runner {
    pub(crate) app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started")
                .field("command", command_name),
        );

        let result = self.dispatch(cmd);

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, "cli", "error", e.to_string()));
        }
        result
    }
}

impl Runner {
    fn dispatch(&self, cmd: EnhanceCommand) -> Result<i32, Error> {
        match cmd {
            EnhanceCommand::Help => {
                print_help();
                Ok(0)
            }
            EnhanceCommand::Scaffold { manifest, into } => {
                let written = self.app.scaffold_use_case.run(&manifest, &into)?;
                self.app.prompt.say(&format!(
                    "Wrote {} file(s) under {}.",
                    written,
                    into.display()
                ));
                Ok(0)
            }
            EnhanceCommand::Enhance { root, instructions } => {
                let instructions = match instructions {
                    Some(i) => i,
                    None => self
                        .app
                        .prompt
                        .ask("What improvements would you like to make?")?,
                };
                if instructions.trim().is_empty() {
                    return Err(Error::invalid_argument(
                        "No improvement instructions provided. Use -i/--instructions.",
                    ));
                }
                let mut session = self.app.new_session()?;
                self.app
                    .enhance_use_case(&root)
                    .run(&mut session, &root, instructions.trim())?;
                Ok(0)
            }
        }
    }
}

fn cmd_name_for_log(cmd: &EnhanceCommand) -> &'static str {
    match cmd {
        EnhanceCommand::Help => "help",
        EnhanceCommand::Scaffold { .. } => "scaffold",
        EnhanceCommand::Enhance { .. } => "enhance",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("enhance: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_enhance(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: enhance [options] [instructions...]");
}

fn print_help() {
    println!("Usage: enhance [options] [instructions...]");
    println!("       enhance --scaffold <manifest.json> [--into <dir>]");
    println!();
    println!("Asks the LLM to improve each source file under the root directory, one file at a time.");
    println!("Every proposal must be confirmed with 'y'; any other answer is sent back as a refinement.");
    println!("After a change is applied the application is launched once to check that it still starts.");
    println!();
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -r, --root <dir>              Directory holding the sources (default: todo_app/app)");
    println!("  -i, --instructions <text>     Improvements to apply (asked on stdin when omitted)");
    println!("  -c, --config <file>           Settings file (default: $ENHANCE_HOME/config/enhance.json)");
    println!("  -p, --provider <provider>     LLM provider: openai, echo");
    println!("  -m, --model <model>           Model name (default: gpt-4)");
    println!("  -v, --verbose                 Mirror structured logs to stderr");
    println!("      --no-interactive          Answer 'n' to every confirmation");
    println!("      --scaffold <manifest>     Write the project structure described by a JSON manifest");
    println!("      --into <dir>              Destination for --scaffold (default: .)");
    println!("      --generate <shell>        Print a shell completion script (bash, zsh, fish, ...)");
    println!();
    println!("Environment:");
    println!("  ENHANCE_HOME                  Home for config/enhance.json and logs/enhance.jsonl");
    println!("  OPENAI_API_KEY                API key for the openai provider (name configurable)");
}
