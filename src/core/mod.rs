pub mod admin;
pub mod export;
pub mod form;
pub mod gate;
pub mod report;
pub mod stats;
pub mod submission_client;

pub use crate::domain::model::{NewSubmission, ServiceOption, Submission, BUDGET_OPTIONS};
pub use crate::domain::ports::{Authenticator, ConfigProvider, StateStore, SubmissionStore};
pub use crate::utils::error::Result;
