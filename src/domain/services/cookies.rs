#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;

use std::io::ErrorKind;
use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Stores the single `name=value` cookie used to resume a chat session.
#[derive(Clone)]
pub struct CookieJar {
    pub path: path::PathBuf,
}

impl Default for CookieJar {
    fn default() -> CookieJar {
        return CookieJar::new(path::PathBuf::from(Config::get(ConfigKey::CookieFile)));
    }
}

impl CookieJar {
    pub fn new(path: path::PathBuf) -> CookieJar {
        return CookieJar { path };
    }

    pub async fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.path).await?;
        let cookie = payload.trim();
        if cookie.is_empty() {
            return Ok(None);
        }

        return Ok(Some(cookie.to_string()));
    }

    pub async fn save(&self, cookie: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(cookie.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = ?self.path, "Stored session cookie");
        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Cleared session cookie");
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}
