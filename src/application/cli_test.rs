use anyhow::Result;
use clap_complete::Shell;

use super::build;
use super::help_text;
use crate::configuration::ConfigKey;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_lists_hotkeys() {
    let text = help_text();
    assert!(text.starts_with("HOTKEYS:"));
    assert!(text.contains("CTRL+R - Reset the conversation."));
    assert!(text.lines().skip(1).all(|line| return line.starts_with("- ")));
}

#[test]
fn it_accepts_global_args_after_chat() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "bot-assistant",
        "chat",
        "--server-url",
        "ws://127.0.0.1:9000/",
    ])?;

    let (name, chat_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "chat");
    assert_eq!(
        chat_matches
            .get_one::<String>(&ConfigKey::ServerURL.to_string())
            .map(|val| return val.as_str()),
        Some("ws://127.0.0.1:9000/")
    );

    return Ok(());
}

#[test]
fn it_requires_a_shell_for_completions() {
    let res = build().try_get_matches_from(vec!["bot-assistant", "completions"]);
    assert!(res.is_err());
}

#[test]
fn it_parses_completions_shell_alongside_server_url() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "bot-assistant",
        "completions",
        "--shell",
        "zsh",
        "-s",
        "ws://127.0.0.1:9000/",
    ])?;

    let (name, completions_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "completions");
    assert_eq!(
        completions_matches.get_one::<Shell>("shell").copied(),
        Some(Shell::Zsh)
    );
    assert_eq!(
        completions_matches
            .get_one::<String>(&ConfigKey::ServerURL.to_string())
            .map(|val| return val.as_str()),
        Some("ws://127.0.0.1:9000/")
    );

    return Ok(());
}
