use std::env;
use std::str::FromStr;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const NOTION_TOKEN: &str = "NOTION_TOKEN";
    pub const NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";
    pub const DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Override for the document API base (e.g. a local proxy).
    pub const NOTION_API_URL: &str = "NOTION_API_URL";
    pub const GEMINI_API_URL: &str = "GEMINI_API_URL";
    /// Seconds-first cron expression. When set, the main binary stays resident
    /// and runs a quiz cycle plus a dashboard refresh on every tick.
    pub const SCHEDULE: &str = "REWISE_SCHEDULE";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
    pub const NOTION_VERSION: &str = "2022-06-28";
    pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const GEMINI_TEMPERATURE: f32 = 0.7;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// The AI call can take much longer than a store round-trip.
    pub const AI_TIMEOUT_SECS: u64 = 120;
}

/// Titles of the structural pages the automation keeps inside the notes database.
pub mod pages {
    pub const ARCHIVE: &str = "Rewise";
    pub const LEDGER: &str = "Review Tracker";
    pub const DASHBOARD: &str = "Rewise Dashboard";

    /// Every structural title. These pages are never quiz subjects and never
    /// count towards dashboard totals.
    pub const RESERVED: [&str; 3] = [ARCHIVE, LEDGER, DASHBOARD];
}

#[derive(Clone, Debug)]
pub struct Config {
    pub notion_token: String,
    pub notion_database_id: String,
    pub notion_api_url: String,
    pub discord_webhook_url: String,
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub schedule: Option<cron::Schedule>,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails before any network I/O when a required credential is missing,
    /// naming every missing variable at once.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let required = [
            env_vars::NOTION_TOKEN,
            env_vars::NOTION_DATABASE_ID,
            env_vars::DISCORD_WEBHOOK_URL,
            env_vars::GOOGLE_API_KEY,
        ];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        let schedule = match get(env_vars::SCHEDULE) {
            Some(expr) => Some(cron::Schedule::from_str(&expr).map_err(|e| {
                format!("Invalid {} expression '{}': {}", env_vars::SCHEDULE, expr, e)
            })?),
            None => None,
        };

        let http_timeout_secs = match get(env_vars::HTTP_TIMEOUT_SECS) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} is not a number ('{}'), using {}s",
                    env_vars::HTTP_TIMEOUT_SECS,
                    raw,
                    defaults::HTTP_TIMEOUT_SECS
                );
                defaults::HTTP_TIMEOUT_SECS
            }),
            None => defaults::HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            notion_token: get(env_vars::NOTION_TOKEN).unwrap_or_default(),
            notion_database_id: get(env_vars::NOTION_DATABASE_ID).unwrap_or_default(),
            notion_api_url: get(env_vars::NOTION_API_URL)
                .unwrap_or_else(|| defaults::NOTION_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            discord_webhook_url: get(env_vars::DISCORD_WEBHOOK_URL).unwrap_or_default(),
            google_api_key: get(env_vars::GOOGLE_API_KEY).unwrap_or_default(),
            gemini_model: get(env_vars::GEMINI_MODEL)
                .unwrap_or_else(|| defaults::GEMINI_MODEL.to_string()),
            gemini_api_url: get(env_vars::GEMINI_API_URL)
                .unwrap_or_else(|| defaults::GEMINI_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            schedule,
            http_timeout_secs,
        })
    }
}
