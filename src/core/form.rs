use crate::core::submission_client::SubmissionClient;
use crate::core::{NewSubmission, ServiceOption, Submission, SubmissionStore};
use crate::utils::validation::{check_email, check_message, check_name};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Company,
    Service,
    Budget,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Company => "company",
            Field::Service => "service",
            Field::Budget => "budget",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

/// Raw form input. Optional fields are empty strings until typed into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub budget: String,
    pub message: String,
}

impl FormFields {
    pub fn is_empty(&self) -> bool {
        *self == FormFields::default()
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Service => &mut self.service,
            Field::Budget => &mut self.budget,
            Field::Message => &mut self.message,
        }
    }

    /// Optional fields are passed through as typed; the client decides
    /// which of them are stored as null.
    pub fn to_submission(&self) -> NewSubmission {
        NewSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            company: Some(self.company.clone()),
            service: self.service.clone(),
            budget: Some(self.budget.clone()),
            message: self.message.clone(),
        }
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Runs every field check; an empty map means the form may be sent.
pub fn validate_fields(fields: &FormFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(message) = check_name(&fields.name) {
        errors.insert(Field::Name, message);
    }
    if let Some(message) = check_email(&fields.email) {
        errors.insert(Field::Email, message);
    }
    if fields.service.parse::<ServiceOption>().is_err() {
        errors.insert(Field::Service, "Please select a service");
    }
    if let Some(message) = check_message(&fields.message) {
        errors.insert(Field::Message, message);
    }

    errors
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

pub struct FormController<S: SubmissionStore> {
    client: SubmissionClient<S>,
    fields: FormFields,
    errors: FieldErrors,
    submit_error: Option<String>,
    status: FormStatus,
    last_submission: Option<Submission>,
    success_display: Duration,
}

impl<S: SubmissionStore> FormController<S> {
    pub fn new(client: SubmissionClient<S>) -> Self {
        Self {
            client,
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            submit_error: None,
            status: FormStatus::Idle,
            last_submission: None,
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }

    pub fn with_success_display(mut self, delay: Duration) -> Self {
        self.success_display = delay;
        self
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// The submit control is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !matches!(self.status, FormStatus::Submitting | FormStatus::Success)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
        self.errors.remove(&field);

        // The banner stays until the next attempt; only the state resets.
        if self.status == FormStatus::Error {
            self.status = FormStatus::Idle;
        }
    }

    /// One submit action. Returns the state the controller settled in:
    /// `Idle` with field errors, `Success`, or `Error`.
    pub async fn submit(&mut self) -> &FormStatus {
        if !self.can_submit() {
            tracing::debug!("Submit ignored while {:?}", self.status);
            return &self.status;
        }

        self.status = FormStatus::Validating;
        self.errors = validate_fields(&self.fields);
        if !self.errors.is_empty() {
            tracing::debug!("Form rejected with {} field error(s)", self.errors.len());
            self.status = FormStatus::Idle;
            return &self.status;
        }

        self.status = FormStatus::Submitting;
        self.submit_error = None;

        match self.client.submit(&self.fields.to_submission()).await {
            Ok(stored) => {
                self.errors.clear();
                self.last_submission = Some(stored);
                self.status = FormStatus::Success;
            }
            Err(e) => {
                self.submit_error = Some(e.message);
                self.status = FormStatus::Error;
            }
        }

        &self.status
    }

    /// Holds the success state for the display delay, then clears the
    /// form. No-op in any other state.
    pub async fn finish_success(&mut self) {
        if self.status != FormStatus::Success {
            return;
        }

        if !self.success_display.is_zero() {
            tokio::time::sleep(self.success_display).await;
        }

        self.fields = FormFields::default();
        self.errors.clear();
        self.status = FormStatus::Idle;
    }
}
