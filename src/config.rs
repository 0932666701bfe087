use std::{fmt, path::PathBuf, time::Duration};

use clap::{Args, Parser};
use url::Url;

pub const DEFAULT_LOGIN_URL: &str = "https://edziekanat.zut.edu.pl/WU/";
pub const DEFAULT_GRADE_URL: &str = "https://edziekanat.zut.edu.pl/WU/OcenyP.aspx";
/// One week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Command-line arguments, each with an environment variable fallback.
#[derive(Parser)]
#[command(name = "grade_notifier")]
#[command(about = "Checks the student portal for new grades and sends them to Discord")]
#[command(version)]
pub struct Config {
    #[command(flatten)]
    pub portal: PortalConfig,

    /// Discord bot token used to send direct messages
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Discord user who receives the notifications
    #[arg(long, env = "DISCORD_USER_ID")]
    pub discord_user_id: Option<u64>,

    /// SQLite database holding every grade seen so far
    #[arg(long, env = "DB_PATH", default_value = "grades.db")]
    pub db_path: PathBuf,

    /// Minutes between two checks
    #[arg(
        long,
        env = "CRON_SCHEDULE",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_MINUTES)
    )]
    pub interval: u64,

    /// File that receives a copy of every log line
    #[arg(long, env = "LOG_PATH", default_value = "gradenotifier.log")]
    pub log_path: PathBuf,

    /// Check once and exit instead of polling
    #[arg(long)]
    pub once: bool,

    /// Print the N most recently stored grades and exit
    #[arg(long, value_name = "N")]
    pub recent: Option<usize>,
}

impl Config {
    pub const fn interval_period(&self) -> Duration {
        Duration::from_secs(self.interval * 60)
    }
}

/// Where and as whom to log in to the portal.
#[derive(Args, Clone)]
pub struct PortalConfig {
    /// Portal login page
    #[arg(long, env = "LOGIN_URL", default_value = DEFAULT_LOGIN_URL)]
    login_url: Url,

    /// Portal page listing the grades
    #[arg(long, env = "GRADE_URL", default_value = DEFAULT_GRADE_URL)]
    grade_url: Url,

    /// Student index number used as the login
    #[arg(long, env = "ZUT_INDEX")]
    index: String,

    /// Portal password
    #[arg(long, env = "ZUT_PASSWORD", hide_env_values = true)]
    password: String,
}

impl PortalConfig {
    pub fn new(
        login_url: Url,
        grade_url: Url,
        index: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            login_url,
            grade_url,
            index: index.into(),
            password: password.into(),
        }
    }

    pub const fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub const fn grade_url(&self) -> &Url {
        &self.grade_url
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("login_url", &self.login_url.as_str())
            .field("grade_url", &self.grade_url.as_str())
            .field("index", &self.index)
            .field("password", &"<redacted>")
            .finish()
    }
}
