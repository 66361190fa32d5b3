pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fmt;

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "contact-intake")]
#[command(about = "Contact form intake and admin dashboard for the company site")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; overrides the flags below")]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:54321")]
    pub store_url: String,

    #[arg(long, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "contact_submissions")]
    pub table: String,

    #[arg(long, default_value = "./.contact-intake")]
    pub state_dir: String,

    #[arg(long, default_value = "admin123")]
    pub admin_secret: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

// Secrets are masked so verbose logging can print the whole config.
#[cfg(feature = "cli")]
impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &str| if value.is_empty() { "" } else { "***" };
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("store_url", &self.store_url)
            .field("api_key", &mask(&self.api_key))
            .field("table", &self.table)
            .field("state_dir", &self.state_dir)
            .field("admin_secret", &mask(&self.admin_secret))
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .field("command", &self.command)
            .finish()
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate and send a contact form submission
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long, default_value = "")]
        service: String,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// List the service and budget choices offered by the form
    Options,
    /// Unlock the admin dashboard
    Login {
        #[arg(long)]
        password: String,
    },
    /// Lock the admin dashboard again
    Logout,
    /// Show submission stats and the newest submissions
    Dashboard,
    /// Write all submissions to a CSV file
    Export {
        #[arg(long)]
        output: String,
    },
    /// Test the connection to the submission store
    Check {
        #[arg(long)]
        with_test_submission: bool,
    },
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn store_endpoint(&self) -> &str {
        &self.store_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn state_dir(&self) -> &str {
        &self.state_dir
    }

    fn admin_secret(&self) -> &str {
        &self.admin_secret
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("store_url", &self.store_url)?;
        validation::validate_non_empty_string("table", &self.table)?;
        validation::validate_path("state_dir", &self.state_dir)?;
        validation::validate_non_empty_string("admin_secret", &self.admin_secret)?;
        Ok(())
    }
}
