//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro")]
#[command(about = "A pausable countdown timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown length in minutes
    #[arg(short, long, default_value = "25")]
    pub minutes: u64,

    /// Seconds added on top of the minutes, so the final "0s" tick is seen
    /// before the countdown expires
    #[arg(long, default_value = "1")]
    pub extra_seconds: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Total countdown length
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.minutes.saturating_mul(60).saturating_add(self.extra_seconds))
    }
}
