use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub sink_timeout: Duration,
    pub log_level: String,
    /// Telegram sink; `None` means the sink is skipped entirely.
    pub telegram: Option<TelegramConfig>,
    /// GitHub repository_dispatch sink; `None` means the sink is skipped.
    pub github: Option<GithubConfig>,
    pub telegram_api_base: String,
    pub github_api_base: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    /// Dispatch target as `owner/repo`.
    pub repo: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("EARLYBIRD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid EARLYBIRD_HOST: {e}"))?;

        let port: u16 = env_or("EARLYBIRD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid EARLYBIRD_PORT: {e}"))?;

        let max_body_size: usize = env_or("EARLYBIRD_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid EARLYBIRD_MAX_BODY_SIZE: {e}"))?;

        let sink_timeout_secs: u64 = env_or("EARLYBIRD_SINK_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid EARLYBIRD_SINK_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("EARLYBIRD_LOG_LEVEL", "info");

        // Both halves of the Telegram credential pair are required; a lone
        // token or chat id disables the sink, matching the original handler.
        let telegram = match (
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_CHAT_ID").ok(),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        let github = std::env::var("GITHUB_TOKEN").ok().map(|token| GithubConfig {
            token,
            repo: env_or("EARLYBIRD_DISPATCH_REPO", "mipromptingeniering-alt/validationidea"),
        });

        let telegram_api_base = env_or("EARLYBIRD_TELEGRAM_API_BASE", "https://api.telegram.org");
        let github_api_base = env_or("EARLYBIRD_GITHUB_API_BASE", "https://api.github.com");

        Ok(Config {
            host,
            port,
            max_body_size,
            sink_timeout: Duration::from_secs(sink_timeout_secs),
            log_level,
            telegram,
            github,
            telegram_api_base,
            github_api_base,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
