pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{cli::FileStateStore, toml_config::TomlConfig};

pub use adapters::{InMemorySubmissionStore, MemoryStateStore, RestSubmissionStore};
pub use core::{
    admin::{AdminConsole, AdminDashboard, AdminScreen, DashboardView},
    form::{Field, FormController, FormStatus},
    gate::{AccessGate, StaticSecretAuthenticator},
    stats::{compute_stats, AdminStats},
    submission_client::{ClientResult, ErrorInfo, SubmissionClient},
};
pub use utils::error::{IntakeError, Result};
