#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Open the dialog when it is closed. Otherwise sends the typed message, or picks the highlighted choice when the message box is empty or read only.
- Esc - Close the dialog.
- Tab - Highlight the next choice.
- Right / Left arrow - Highlight the next or previous choice when the message box is empty or read only.
- 1-9 - Pick a choice by its number while the message box is read only.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+O - Toggle the dialog.
- CTRL+R - Reset the conversation. The session cookie is deleted and the connection is closed.
- CTRL+N - Connect to the assistant service when disconnected.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Directory the debug log is written to when `RUST_LOG` contains `bot_assistant`.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("BOT_ASSISTANT_LOG_DIR") {
        if !dir.is_empty() {
            return path::PathBuf::from(dir);
        }
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("bot-assistant");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Bot Assistant")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=bot_assistant")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Open the assistant dialog and connect to the service.");
}

fn arg_bot_name() -> Arg {
    return Arg::new(ConfigKey::BotName.to_string())
        .long(ConfigKey::BotName.to_string())
        .env("BOT_ASSISTANT_BOT_NAME")
        .num_args(1)
        .help(format!(
            "Name shown in the dialog header and above bot bubbles. [default: {}]",
            Config::default(ConfigKey::BotName)
        ))
        .global(true);
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("BOT_ASSISTANT_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

fn arg_cookie_file() -> Arg {
    return Arg::new(ConfigKey::CookieFile.to_string())
        .long(ConfigKey::CookieFile.to_string())
        .env("BOT_ASSISTANT_COOKIE_FILE")
        .num_args(1)
        .help(format!(
            "File the session cookie is persisted to between runs. [default: {}]",
            Config::default(ConfigKey::CookieFile)
        ))
        .global(true);
}

fn arg_cookie_name() -> Arg {
    return Arg::new(ConfigKey::CookieName.to_string())
        .long(ConfigKey::CookieName.to_string())
        .env("BOT_ASSISTANT_COOKIE_NAME")
        .num_args(1)
        .help(format!(
            "Name of the cookie the service uses to track the session. [default: {}]",
            Config::default(ConfigKey::CookieName)
        ))
        .global(true);
}

fn arg_heartbeat_interval() -> Arg {
    return Arg::new(ConfigKey::HeartbeatInterval.to_string())
        .long(ConfigKey::HeartbeatInterval.to_string())
        .env("BOT_ASSISTANT_HEARTBEAT_INTERVAL")
        .num_args(1)
        .help(format!(
            "Milliseconds between WebSocket pings, 0 disables them. [default: {}]",
            Config::default(ConfigKey::HeartbeatInterval)
        ))
        .global(true);
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .short('s')
        .long(ConfigKey::ServerURL.to_string())
        .env("BOT_ASSISTANT_SERVER_URL")
        .num_args(1)
        .help(format!(
            "WebSocket URL of the assistant service. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ))
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("BOT_ASSISTANT_USERNAME")
        .num_args(1)
        .help("Your user name displayed above your chat bubbles. Defaults to $USER.")
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("bot-assistant")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_bot_name())
        .arg(arg_config_file())
        .arg(arg_cookie_file())
        .arg(arg_cookie_name())
        .arg(arg_heartbeat_interval())
        .arg(arg_server_url())
        .arg(arg_username());
}

/// Parses arguments and loads config. Returns false when a subcommand was
/// handled and the dialog should not start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
