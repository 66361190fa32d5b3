use crate::core::Submission;
use crate::utils::error::{IntakeError, Result};

const HEADER: [&str; 8] = [
    "id",
    "created_at",
    "name",
    "email",
    "company",
    "service",
    "budget",
    "message",
];

/// All submissions as CSV, in the order given.
pub fn submissions_to_csv(submissions: &[Submission]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for s in submissions {
        writer.write_record([
            s.id.as_deref().unwrap_or_default(),
            s.created_at.as_deref().unwrap_or_default(),
            s.name.as_str(),
            s.email.as_str(),
            s.company.as_deref().unwrap_or_default(),
            s.service.as_str(),
            s.budget.as_deref().unwrap_or_default(),
            s.message.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| IntakeError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| IntakeError::ValidationError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
