use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use credit_core::model::{ApiBaseUrl, ForecastDraft, SessionId};
use services::ApiConfig;

use crate::db::normalize_sqlite_url;

#[derive(Debug, Parser)]
#[command(name = "credit45")]
#[command(about = "45Q carbon capture tax credit assistant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Backend base URL
    #[arg(
        long,
        global = true,
        env = "CREDIT45_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub api_url: String,

    /// SQLite database holding saved questionnaire progress
    #[arg(
        long = "db",
        global = true,
        env = "CREDIT45_DB_URL",
        default_value = "sqlite:credit45.sqlite3"
    )]
    pub db_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "CREDIT45_TIMEOUT_SECS",
        default_value_t = 120,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Session id sent to the backend (defaults to `company-<millis>`)
    #[arg(long, global = true, env = "CREDIT45_SESSION_ID")]
    pub session: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the desktop window (default)
    Ui,

    /// Ask the regulatory knowledge base a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Ask the knowledge base which eligibility questions its documents call for
    Analyze,

    /// Run the conversational interview on stdin/stdout
    Interview,

    /// Forecast credits for a facility
    Forecast(ForecastArgs),

    /// Upload PDF documents to the knowledge base
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show knowledge base statistics
    Stats,

    /// Check backend health
    Health,

    /// Rebuild the server-side question base
    RegenerateQuestions,

    /// Inspect or discard saved questionnaire progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ProgressAction {
    Show,
    Clear,
}

/// Forecast inputs; unset flags keep the form defaults.
#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Metric tons of CO2 captured per year
    #[arg(long)]
    pub annual_co2: String,

    #[arg(long)]
    pub facility_type: Option<String>,

    /// Percent, 0-100
    #[arg(long)]
    pub capture_efficiency: Option<String>,

    #[arg(long)]
    pub sequestration_method: Option<String>,

    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub start_date: Option<String>,

    /// Percent, 0-100
    #[arg(long)]
    pub domestic_content: Option<String>,

    #[arg(long)]
    pub energy_community: bool,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub ownership: Option<String>,

    #[arg(long)]
    pub technology_ownership: Option<String>,
}

impl ForecastArgs {
    pub fn into_draft(self, today: NaiveDate) -> ForecastDraft {
        let mut draft = ForecastDraft::with_start_date(today);
        draft.annual_co2_captured = self.annual_co2;
        draft.energy_community = self.energy_community;
        let overrides = [
            (&mut draft.facility_type, self.facility_type),
            (&mut draft.capture_efficiency, self.capture_efficiency),
            (&mut draft.sequestration_method, self.sequestration_method),
            (&mut draft.start_date, self.start_date),
            (&mut draft.domestic_content, self.domestic_content),
            (&mut draft.location, self.location),
            (&mut draft.ownership, self.ownership),
            (&mut draft.technology_ownership, self.technology_ownership),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        draft
    }
}

/// Validated global options.
#[derive(Debug)]
pub struct Settings {
    pub api: ApiConfig,
    pub db_url: String,
    pub session_id: Option<SessionId>,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings> {
        let base_url = ApiBaseUrl::parse(&self.api_url)
            .with_context(|| format!("invalid --api-url value: {}", self.api_url))?;
        if self.db_url.trim().is_empty() {
            anyhow::bail!("--db must not be empty");
        }
        let session_id = self
            .session
            .as_deref()
            .map(SessionId::new)
            .transpose()
            .context("invalid --session value")?;

        Ok(Settings {
            api: ApiConfig::new(base_url).with_timeout(Duration::from_secs(self.timeout_secs)),
            db_url: normalize_sqlite_url(&self.db_url),
            session_id,
        })
    }
}
