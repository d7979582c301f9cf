use log::info;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::{Expenses, Profile};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub profile: Profile,
    pub expenses: Expenses,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            expenses: Expenses::session_defaults(),
        }
    }
}

/// The live profile and expenses for a running dashboard.
///
/// Readers get an immutable snapshot; an edit replaces the profile or the
/// expense list as a whole, so a calculation never sees a half-applied form.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Arc<Session>>,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            current: RwLock::new(Arc::new(session)),
        }
    }

    pub fn snapshot(&self) -> Arc<Session> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn replace_profile(&self, profile: Profile) -> Arc<Session> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(Session {
            profile,
            expenses: guard.expenses.clone(),
        });
        *guard = Arc::clone(&next);
        info!(
            "profile replaced (age {}, retirement age {})",
            next.profile.age, next.profile.retirement_age
        );
        next
    }

    pub fn replace_expenses(&self, expenses: Expenses) -> Arc<Session> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(Session {
            profile: guard.profile.clone(),
            expenses,
        });
        *guard = Arc::clone(&next);
        info!("expenses replaced ({} categories)", next.expenses.len());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_dashboard_defaults() {
        let store = SessionStore::default();
        let session = store.snapshot();
        assert_eq!(session.profile, Profile::default());
        assert_eq!(session.expenses.len(), 9);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_edits() {
        let store = SessionStore::new(Session::default());
        let before = store.snapshot();

        let profile = Profile {
            age: 40,
            ..Profile::default()
        };
        store.replace_profile(profile);

        assert_eq!(before.profile.age, 25);
        assert_eq!(store.snapshot().profile.age, 40);
    }

    #[test]
    fn replacing_expenses_keeps_profile() {
        let store = SessionStore::new(Session {
            profile: Profile {
                income: 50_000.0,
                ..Profile::default()
            },
            expenses: Expenses::session_defaults(),
        });

        let expenses: Expenses = [("Rent", 1_200.0)].into_iter().collect();
        let session = store.replace_expenses(expenses);

        assert_eq!(session.profile.income, 50_000.0);
        assert_eq!(session.expenses.len(), 1);
        assert_eq!(session.expenses.get("Rent"), Some(1_200.0));
        assert_eq!(session.expenses.get("Housing"), None);
    }
}
