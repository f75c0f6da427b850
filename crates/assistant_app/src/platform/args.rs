use std::time::Duration;

use anyhow::Context;
use assistant_engine::BackendSettings;
use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

/// Console client for the employee assistant service.
#[derive(Parser, Debug)]
#[command(name = "assistant", version, about)]
pub struct Args {
    /// Base URL of the assistant backend.
    #[arg(long, default_value = "http://localhost:8000")]
    pub backend_url: String,
    /// Whole-request timeout in seconds. Unset means no client-side timeout.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,
    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl Args {
    pub fn backend_settings(&self) -> anyhow::Result<BackendSettings> {
        let mut settings = BackendSettings::with_base_url(&self.backend_url)
            .with_context(|| format!("invalid --backend-url {:?}", self.backend_url))?;
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        settings.connect_timeout = self.connect_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_backend_without_timeouts() {
        let args = Args::parse_from(["assistant"]);
        let settings = args.backend_settings().expect("settings");

        assert_eq!(settings.base_url, "http://localhost:8000/");
        assert_eq!(settings.request_timeout, None);
        assert_eq!(args.log_destination(), LogDestination::File);
        assert_eq!(args.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "assistant",
            "--backend-url",
            "https://hr.example.com/api",
            "--request-timeout-secs",
            "30",
            "--log",
            "both",
            "-v",
        ]);
        let settings = args.backend_settings().expect("settings");

        assert_eq!(settings.base_url, "https://hr.example.com/api/");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(args.log_destination(), LogDestination::Both);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn bad_backend_url_is_an_error() {
        let args = Args::parse_from(["assistant", "--backend-url", "localhost"]);
        assert!(args.backend_settings().is_err());
    }
}
