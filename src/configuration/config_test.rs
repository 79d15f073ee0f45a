use anyhow::Result;
use once_cell::sync::Lazy;
use tokio::fs;
use tokio::sync::Mutex;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// Config is process global, loads must not interleave.
static LOCK: Lazy<Mutex<()>> = Lazy::new(|| return Mutex::new(()));

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>();
    assert!(doc.is_ok());

    assert!(res.contains("bot-name = \"Bot Assistant\""));
    assert!(res.contains("heartbeat-interval = 30000"));
    assert!(res.contains("server-url = \"ws://localhost:9998/\""));
    assert!(res.contains("# username = \"\""));
    assert!(!res.contains("config-file"));
}

#[test]
fn it_uses_kebab_case_keys() {
    assert_eq!(ConfigKey::ServerURL.to_string(), "server-url");
    assert_eq!(ConfigKey::HeartbeatInterval.to_string(), "heartbeat-interval");
    assert_eq!(ConfigKey::CookieFile.to_string(), "cookie-file");
}

#[tokio::test]
async fn it_loads_defaults_without_file() -> Result<()> {
    let _lock = LOCK.lock().await;
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("missing.toml");

    let matches = cli::build().try_get_matches_from(vec![
        "bot-assistant",
        "chat",
        "-c",
        config_path.to_str().unwrap(),
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::BotName), "Bot Assistant");
    assert_eq!(Config::get(ConfigKey::HeartbeatInterval), "30000");
    assert_eq!(Config::get(ConfigKey::ServerURL), "ws://localhost:9998/");
    assert_eq!(
        Config::get(ConfigKey::ConfigFile),
        config_path.to_str().unwrap()
    );

    return Ok(());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let _lock = LOCK.lock().await;
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "bot-name = \"Helper\"\nheartbeat-interval = 0\nserver-url = \"ws://example.com/chat\"\n",
    )
    .await?;

    let matches = cli::build().try_get_matches_from(vec![
        "bot-assistant",
        "-c",
        config_path.to_str().unwrap(),
        "--server-url",
        "ws://127.0.0.1:9000/",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::BotName), "Helper");
    assert_eq!(Config::get(ConfigKey::HeartbeatInterval), "0");
    assert_eq!(Config::get(ConfigKey::ServerURL), "ws://127.0.0.1:9000/");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_invalid_heartbeat() -> Result<()> {
    let _lock = LOCK.lock().await;
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "heartbeat-interval = \"often\"\n").await?;

    let matches = cli::build().try_get_matches_from(vec![
        "bot-assistant",
        "chat",
        "-c",
        config_path.to_str().unwrap(),
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_invalid_value_type() -> Result<()> {
    let _lock = LOCK.lock().await;
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "bot-name = [1, 2]\n").await?;

    let matches = cli::build().try_get_matches_from(vec![
        "bot-assistant",
        "-c",
        config_path.to_str().unwrap(),
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    return Ok(());
}
