use crate::core::admin::{AdminScreen, DashboardView};
use crate::core::form::{FormController, FormStatus};
use crate::core::stats::parse_created_at;
use crate::core::{Submission, SubmissionStore};
use chrono::TimeZone;
use std::fmt::Display;

/// `Oct 25, 2025, 10:00 AM` in the given zone.
pub fn format_date<Tz: TimeZone>(created_at: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match created_at.and_then(|at| parse_created_at(at, tz)) {
        Some(at) => at.with_timezone(tz).format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn submission_card<Tz: TimeZone>(submission: &Submission, tz: &Tz) -> Vec<String>
where
    Tz::Offset: Display,
{
    let mut header = format!("{}  [{}]", submission.name, submission.service);
    if let Some(budget) = &submission.budget {
        header.push_str(&format!("  {}", budget));
    }

    let mut lines = vec![header, format!("  Email:   {}", submission.email)];
    if let Some(company) = &submission.company {
        lines.push(format!("  Company: {}", company));
    }
    lines.push(format!(
        "  Date:    {}",
        format_date(submission.created_at.as_deref(), tz)
    ));
    lines.push("  Message:".to_string());
    lines.extend(submission.message.lines().map(|line| format!("    {}", line)));
    lines
}

pub fn render_dashboard<Tz: TimeZone>(view: &DashboardView, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut lines = vec![
        "Admin Dashboard".to_string(),
        "Contact form submissions overview".to_string(),
        String::new(),
    ];

    if let Some(error) = &view.error {
        lines.push(format!("! {}", error));
        lines.push(String::new());
    }

    lines.push(format!("Total Submissions: {}", view.stats.total));
    lines.push(format!("Today:             {}", view.stats.today));
    lines.push(format!("This Week:         {}", view.stats.this_week));
    lines.push(format!("This Month:        {}", view.stats.this_month));
    if let Some(count) = view.stored_count {
        lines.push(format!("Stored records:    {}", count));
    }
    lines.push(String::new());

    lines.push("Recent Submissions".to_string());
    if view.submissions.is_empty() {
        lines.push("No submissions yet".to_string());
        lines.push("Contact form submissions will appear here".to_string());
    } else {
        for submission in &view.submissions {
            lines.push(String::new());
            lines.extend(submission_card(submission, tz));
        }
    }

    lines.join("\n")
}

pub fn render_login_prompt(error: Option<&str>) -> String {
    let mut lines = vec![
        "Admin Access".to_string(),
        "Enter password to view contact submissions".to_string(),
    ];
    if let Some(error) = error {
        lines.push(format!("! {}", error));
    }
    lines.join("\n")
}

pub fn render_admin_screen<Tz: TimeZone>(screen: &AdminScreen, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match screen {
        AdminScreen::LoginPrompt { error } => render_login_prompt(error.as_deref()),
        AdminScreen::Dashboard(view) => render_dashboard(view, tz),
    }
}

pub fn render_form_outcome<S: SubmissionStore>(form: &FormController<S>) -> String {
    if *form.status() == FormStatus::Success {
        return "Thank You! Your message has been sent successfully. \
                We'll get back to you within 24 hours."
            .to_string();
    }

    let mut lines = Vec::new();
    if let Some(error) = form.submit_error() {
        lines.push(format!("! {}", error));
    }
    if !form.errors().is_empty() {
        lines.push("Please fix the following:".to_string());
        lines.extend(
            form.errors()
                .iter()
                .map(|(field, message)| format!("  - {}: {}", field, message)),
        );
    }
    if lines.is_empty() {
        lines.push(format!("Form is {:?}", form.status()));
    }
    lines.join("\n")
}
