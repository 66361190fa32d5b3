use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A persisted contact-form lead, as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub service: String,
    #[serde(default)]
    pub budget: Option<String>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The caller-supplied field set of a submission. `id` and `created_at`
/// are assigned at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub service: String,
    pub budget: Option<String>,
    pub message: String,
}

impl NewSubmission {
    /// Whether a stored record carries exactly these caller-supplied fields.
    pub fn matches(&self, stored: &Submission) -> bool {
        self.name == stored.name
            && self.email == stored.email
            && self.company == stored.company
            && self.service == stored.service
            && self.budget == stored.budget
            && self.message == stored.message
    }
}

// Ids may come back as uuid strings or bigint identity columns.
fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOption {
    MobileAppDevelopment,
    WebsiteDevelopment,
    CustomSoftwareDevelopment,
    ConsultingServices,
    Other,
}

impl ServiceOption {
    pub const ALL: [ServiceOption; 5] = [
        ServiceOption::MobileAppDevelopment,
        ServiceOption::WebsiteDevelopment,
        ServiceOption::CustomSoftwareDevelopment,
        ServiceOption::ConsultingServices,
        ServiceOption::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceOption::MobileAppDevelopment => "Mobile App Development",
            ServiceOption::WebsiteDevelopment => "Website Development",
            ServiceOption::CustomSoftwareDevelopment => "Custom Software Development",
            ServiceOption::ConsultingServices => "Consulting Services",
            ServiceOption::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ServiceOption::ALL
            .into_iter()
            .find(|option| option.label() == s)
            .ok_or_else(|| format!("Unknown service: {}", s))
    }
}

/// Budget ranges offered by the form. Budget is free text on the wire and
/// never validated against this list.
pub const BUDGET_OPTIONS: [&str; 5] = [
    "$5,000 - $10,000",
    "$10,000 - $25,000",
    "$25,000 - $50,000",
    "$50,000+",
    "Let's discuss",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_option_labels_round_trip() {
        for option in ServiceOption::ALL {
            assert_eq!(option.label().parse::<ServiceOption>(), Ok(option));
        }
        assert!("".parse::<ServiceOption>().is_err());
        assert!("website development".parse::<ServiceOption>().is_err());
    }

    #[test]
    fn test_submission_accepts_numeric_id_and_nulls() {
        let row = serde_json::json!({
            "id": 42,
            "name": "Jane Doe",
            "email": "jane@x.com",
            "company": null,
            "service": "Website Development",
            "budget": null,
            "message": "Please build me a ten-page site.",
            "created_at": "2025-10-25T10:00:00.123456+00:00"
        });

        let submission: Submission = serde_json::from_value(row).unwrap();
        assert_eq!(submission.id.as_deref(), Some("42"));
        assert_eq!(submission.company, None);
        assert_eq!(
            submission.created_at.as_deref(),
            Some("2025-10-25T10:00:00.123456+00:00")
        );
    }
}
