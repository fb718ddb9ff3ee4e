use std::io;

use anyhow::Result;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::services::actions::help_text;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file(config_path_str: String) -> Result<()> {
    let config_path = std::path::PathBuf::from(config_path_str);
    let parent = config_path.parent().unwrap();

    if !parent.exists() {
        fs::create_dir_all(parent).await?;
    }

    if !config_path.exists() {
        fs::write(&config_path, Config::serialize_default(build())).await?;
    }

    return Ok(());
}

fn format_commands_text() -> String {
    return help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS") || line.starts_with("HOTKEYS") {
                return format!("CHAT {line}").bold().underline().to_string();
            }

            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("FINTALK_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

fn chat_arguments() -> Vec<Arg> {
    return vec![
        arg_config_file(),
        Arg::new(ConfigKey::Backend.to_string())
            .short('b')
            .long(ConfigKey::Backend.to_string())
            .env("FINTALK_BACKEND")
            .num_args(1)
            .help(format!(
                "The initial backend hosting a model to connect to. [default: {}]",
                Config::default(ConfigKey::Backend)
            ))
            .value_parser(clap::builder::PossibleValuesParser::new(
                BackendName::VARIANTS,
            ))
            .global(true),
        Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
            .long(ConfigKey::BackendHealthCheckTimeout.to_string())
            .env("FINTALK_BACKEND_HEALTH_CHECK_TIMEOUT")
            .num_args(1)
            .help(format!(
                "Time to wait in milliseconds before timing out when doing a backend health check. [default: {}]",
                Config::default(ConfigKey::BackendHealthCheckTimeout)
            ))
            .global(true),
        Arg::new(ConfigKey::Model.to_string())
            .short('m')
            .long(ConfigKey::Model.to_string())
            .env("FINTALK_MODEL")
            .num_args(1)
            .help(format!(
                "The initial model on a backend to consume. [default: {}]",
                Config::default(ConfigKey::Model)
            ))
            .global(true),
        Arg::new(ConfigKey::GeminiURL.to_string())
            .long(ConfigKey::GeminiURL.to_string())
            .env("FINTALK_GEMINI_URL")
            .num_args(1)
            .help(format!(
                "Gemini API URL when using the Gemini backend. [default: {}]",
                Config::default(ConfigKey::GeminiURL)
            ))
            .global(true),
        Arg::new(ConfigKey::AttachContext.to_string())
            .long(ConfigKey::AttachContext.to_string())
            .env("FINTALK_ATTACH_CONTEXT")
            .num_args(1)
            .help(format!(
                "Whether the processed financial table is attached to prompts on startup. [default: {}]",
                Config::default(ConfigKey::AttachContext)
            ))
            .value_parser(clap::builder::PossibleValuesParser::new(["true", "false"]))
            .global(true),
        Arg::new(ConfigKey::Username.to_string())
            .short('u')
            .long(ConfigKey::Username.to_string())
            .env("FINTALK_USERNAME")
            .num_args(1)
            .help(format!(
                "Your user name displayed in all chat bubbles. [default: {}]",
                Config::default(ConfigKey::Username)
            ))
            .global(true),
    ];
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers")
        .hide(true)
        .subcommand(Command::new("log-path").about("Prints the path debug logs are written to"))
        .subcommand(Command::new("enum-config").about("Prints all configuration keys"));
}

pub fn build() -> Command {
    return Command::new("fintalk")
        .about(format!(
            "{}\n\nVersion: {}",
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION")
        ))
        .after_help(format_commands_text())
        .args(chat_arguments())
        .subcommand(
            Command::new("chat")
                .about("Start a new chat session (default command)")
                .after_help(format_commands_text()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generates shell completions")
                .arg(
                    Arg::new("shell")
                        .short('s')
                        .long("shell")
                        .num_args(1)
                        .required(true)
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(Shell))
                        .help("Which shell to generate completions for"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration file options")
                .subcommand(Command::new("create").about(format!(
                    "Saves the default config file to {}",
                    Config::default(ConfigKey::ConfigFile)
                )))
                .subcommand(Command::new("default").about("Outputs the default configuration file to stdout"))
                .subcommand(
                    Command::new("path").about("Returns the default path for the config file"),
                ),
        )
        .subcommand(subcommand_debug());
}

async fn handle_config_subcommands(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("create", _)) => {
            let config_path = Config::default(ConfigKey::ConfigFile);
            create_config_file(config_path.clone()).await?;
            println!("Created config file at {config_path}");
        }
        Some(("default", _)) => {
            println!("{}", Config::serialize_default(build()));
        }
        Some(("path", _)) => {
            println!("{}", Config::default(ConfigKey::ConfigFile));
        }
        _ => {
            build()
                .get_subcommands_mut()
                .find(|subcmd| return subcmd.get_name() == "config")
                .unwrap()
                .print_long_help()?;
        }
    }

    return Ok(());
}

/// Parses the command line and loads configuration. Returns true when the
/// chat interface should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(shell) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(shell, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => {
            handle_config_subcommands(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("fintalk/debug.log");
                    println!("{}", log_path.to_str().unwrap());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
