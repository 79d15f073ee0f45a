#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BotName,
    ConfigFile,
    CookieFile,
    CookieName,
    HeartbeatInterval,
    ServerURL,
    Username,
}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base.unwrap_or_else(env::temp_dir).join("bot-assistant");
}

fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&Arg> {
    let name = key.to_string();
    return cmd
        .get_arguments()
        .find(|arg| return arg.get_long() == Some(name.as_str()));
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let config_path = app_dir(dirs::config_dir()).join("config.toml");
        let cookie_path = app_dir(dirs::cache_dir()).join("cookie");

        let res = match key {
            ConfigKey::BotName => "Bot Assistant",
            ConfigKey::CookieName => "Bot-Assistant",
            ConfigKey::HeartbeatInterval => "30000",
            ConfigKey::ServerURL => "ws://localhost:9998/",

            // Paths
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::CookieFile => return cookie_path.to_string_lossy().to_string(),
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    fn validate() -> Result<()> {
        let heartbeat = Config::get(ConfigKey::HeartbeatInterval);
        if heartbeat.parse::<u64>().is_err() {
            bail!(format!(
                "Invalid value for '{}': {heartbeat}\nExpected a number of milliseconds.",
                ConfigKey::HeartbeatInterval
            ));
        }

        if Config::get(ConfigKey::BotName).trim().is_empty() {
            bail!(format!("'{}' cannot be empty", ConfigKey::BotName));
        }

        return Ok(());
    }

    /// Loads defaults, then the config file, then CLI arguments and
    /// environment variables. Later sources win.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if find_arg(&cmd, key).is_none() {
                        bail!(format!("config.toml has an unsupported key '{key}'"));
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': {}",
                            val.to_string().trim()
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            bot_name = Config::get(ConfigKey::BotName),
            config_file = Config::get(ConfigKey::ConfigFile),
            cookie_file = Config::get(ConfigKey::CookieFile),
            heartbeat_interval = Config::get(ConfigKey::HeartbeatInterval),
            server_url = Config::get(ConfigKey::ServerURL),
            username = Config::get(ConfigKey::Username),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed above your chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = find_arg(&cmd, key)?;
                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let val = Config::default(key);
                if key == ConfigKey::CookieFile {
                    return Some(format!("# {description}\n# {key} = \"{val}\""));
                }

                let line = if val.parse::<u64>().is_ok() {
                    format!("{key} = {val}")
                } else {
                    format!("{key} = \"{val}\"")
                };

                return Some(format!("# {description}\n{line}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
