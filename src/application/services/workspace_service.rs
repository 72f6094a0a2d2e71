//! Per-session admin workspaces.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::content_store::ContentStore;
use crate::domain::workspace::AdminWorkspace;

/// Holds one [`AdminWorkspace`] per admin session, keyed by session hash.
///
/// Workspaces are created lazily from a fresh content snapshot the first
/// time a session opens an admin screen and discarded at logout or session
/// expiry.
pub struct WorkspaceService {
    content: ContentStore,
    workspaces: Mutex<HashMap<String, AdminWorkspace>>,
}

impl WorkspaceService {
    pub fn new(content: ContentStore) -> Self {
        Self {
            content,
            workspaces: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AdminWorkspace>> {
        self.workspaces
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `f` against the session's workspace, creating it if needed.
    pub fn with<R>(&self, session_hash: &str, f: impl FnOnce(&mut AdminWorkspace) -> R) -> R {
        let mut workspaces = self.lock();
        let workspace = workspaces
            .entry(session_hash.to_string())
            .or_insert_with(|| {
                debug!("Admin workspace created");
                AdminWorkspace::new(self.content.snapshot())
            });
        f(workspace)
    }

    pub fn discard(&self, session_hash: &str) -> bool {
        self.lock().remove(session_hash).is_some()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PortfolioDomain;

    #[test]
    fn test_workspaces_are_isolated_per_session() {
        let service = WorkspaceService::new(ContentStore::builtin());

        service.with("a", |ws| {
            ws.content
                .update_domain_text(PortfolioDomain::Cs, "edited".into(), "about".into())
        });

        let tagline_b = service.with("b", |ws| ws.content.domain(PortfolioDomain::Cs).tagline.clone());
        let tagline_a = service.with("a", |ws| ws.content.domain(PortfolioDomain::Cs).tagline.clone());
        assert_ne!(tagline_b, "edited");
        assert_eq!(tagline_a, "edited");
        assert_eq!(service.count(), 2);
    }

    #[test]
    fn test_discard_drops_edits() {
        let service = WorkspaceService::new(ContentStore::builtin());
        service.with("a", |ws| ws.messages.delete("1").map(|_| ())).unwrap();

        assert!(service.discard("a"));
        assert!(!service.discard("a"));
        assert_eq!(service.with("a", |ws| ws.messages.all().len()), 4);
    }
}
