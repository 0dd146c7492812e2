//! Explicit per-session context.

use uuid::Uuid;

use crate::Watchlist;

/// One interactive session: identifier plus the state scoped to it.
///
/// Handlers receive this context explicitly instead of reaching for
/// process-wide state; the session's lifetime is the caller's to manage
/// (one per process for the CLI, one per connection for a long-lived UI).
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    pub watchlist: Watchlist,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            watchlist: Watchlist::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_start_empty_with_distinct_ids() {
        let a = Session::new();
        let b = Session::new();
        assert!(a.watchlist.is_empty());
        assert_ne!(a.id(), b.id());
    }
}
