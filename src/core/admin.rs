use crate::core::gate::AccessGate;
use crate::core::stats::{compute_stats, AdminStats};
use crate::core::submission_client::SubmissionClient;
use crate::core::{Authenticator, StateStore, Submission, SubmissionStore};
use crate::utils::error::Result;
use chrono::{DateTime, TimeZone};

/// Everything the dashboard page renders after one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub stats: AdminStats,
    pub submissions: Vec<Submission>,
    /// Lightweight stored count; `None` when that call failed.
    pub stored_count: Option<u64>,
    /// Page-level banner. When set, stats are zero and the list is empty.
    pub error: Option<String>,
}

pub struct AdminDashboard<S: SubmissionStore> {
    client: SubmissionClient<S>,
}

impl<S: SubmissionStore> AdminDashboard<S> {
    pub fn new(client: SubmissionClient<S>) -> Self {
        Self { client }
    }

    pub async fn load<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardView {
        let (listed, counted) = tokio::join!(self.client.list_all(), self.client.count_all());

        match listed {
            Ok(submissions) => DashboardView {
                stats: compute_stats(&submissions, now),
                submissions,
                stored_count: counted.ok(),
                error: None,
            },
            Err(e) => DashboardView {
                error: Some(e.message),
                ..DashboardView::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminScreen {
    LoginPrompt { error: Option<String> },
    Dashboard(DashboardView),
}

/// Top-level admin controller: owns the gate and decides which screen the
/// admin page shows.
pub struct AdminConsole<A: Authenticator, K: StateStore, S: SubmissionStore> {
    gate: AccessGate<A, K>,
    dashboard: AdminDashboard<S>,
}

impl<A: Authenticator, K: StateStore, S: SubmissionStore> AdminConsole<A, K, S> {
    pub fn new(gate: AccessGate<A, K>, dashboard: AdminDashboard<S>) -> Self {
        Self { gate, dashboard }
    }

    pub fn gate(&self) -> &AccessGate<A, K> {
        &self.gate
    }

    pub async fn open<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AdminScreen {
        if self.gate.is_unlocked().await {
            AdminScreen::Dashboard(self.dashboard.load(now).await)
        } else {
            AdminScreen::LoginPrompt { error: None }
        }
    }

    pub async fn login<Tz: TimeZone>(
        &self,
        password: &str,
        now: &DateTime<Tz>,
    ) -> Result<AdminScreen> {
        if self.gate.unlock(password).await? {
            Ok(AdminScreen::Dashboard(self.dashboard.load(now).await))
        } else {
            Ok(AdminScreen::LoginPrompt {
                error: Some("Invalid password".to_string()),
            })
        }
    }

    pub async fn logout(&self) -> Result<AdminScreen> {
        self.gate.lock().await?;
        Ok(AdminScreen::LoginPrompt { error: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySubmissionStore, MemoryStateStore};
    use crate::core::gate::StaticSecretAuthenticator;
    use crate::core::NewSubmission;
    use chrono::Utc;

    type Console =
        AdminConsole<StaticSecretAuthenticator, MemoryStateStore, InMemorySubmissionStore>;

    fn console(store: InMemorySubmissionStore) -> Console {
        AdminConsole::new(
            AccessGate::new(
                StaticSecretAuthenticator::new("admin123"),
                MemoryStateStore::new(),
            ),
            AdminDashboard::new(SubmissionClient::new(store)),
        )
    }

    async fn seeded_store() -> InMemorySubmissionStore {
        let store = InMemorySubmissionStore::new();
        for name in ["Ada", "Grace"] {
            store
                .insert(&NewSubmission {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    company: None,
                    service: "Consulting Services".to_string(),
                    budget: Some("Let's discuss".to_string()),
                    message: "We would like a quote for an audit.".to_string(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_locked_console_shows_login_prompt() {
        let console = console(seeded_store().await);
        assert_eq!(
            console.open(&Utc::now()).await,
            AdminScreen::LoginPrompt { error: None }
        );
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_prompt() {
        let console = console(seeded_store().await);
        let screen = console.login("letmein", &Utc::now()).await.unwrap();

        assert_eq!(
            screen,
            AdminScreen::LoginPrompt {
                error: Some("Invalid password".to_string())
            }
        );
        assert!(!console.gate().is_unlocked().await);
    }

    #[tokio::test]
    async fn test_login_reveals_dashboard_and_logout_hides_it() {
        let console = console(seeded_store().await);

        match console.login("admin123", &Utc::now()).await.unwrap() {
            AdminScreen::Dashboard(view) => {
                assert_eq!(view.error, None);
                assert_eq!(view.submissions.len(), 2);
                assert_eq!(view.stored_count, Some(2));
                assert_eq!(view.stats.total, 2);
                assert_eq!(view.stats.today, 2);
            }
            other => panic!("expected dashboard, got {:?}", other),
        }
        assert!(matches!(console.open(&Utc::now()).await, AdminScreen::Dashboard(_)));

        console.logout().await.unwrap();
        assert_eq!(
            console.open(&Utc::now()).await,
            AdminScreen::LoginPrompt { error: None }
        );
    }

    #[tokio::test]
    async fn test_failed_list_renders_error_with_zeroed_stats() {
        let store = seeded_store().await;
        store.fail_with("upstream timeout").await;
        let dashboard = AdminDashboard::new(SubmissionClient::new(store));

        let view = dashboard.load(&Utc::now()).await;

        assert_eq!(view.error.as_deref(), Some("Failed to fetch submissions"));
        assert_eq!(view.stats, AdminStats::default());
        assert!(view.submissions.is_empty());
        assert_eq!(view.stored_count, None);
    }
}
