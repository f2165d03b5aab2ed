//! In-memory collaborators for tests and scenario replays.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hoverreel_model::{
    ContentId, LikeAction, LikeToggle, PreferenceSnapshot, WatchlistAction,
    WatchlistToggle,
};
use parking_lot::RwLock;

use crate::collaborators::PreferenceService;
use crate::error::PreferenceError;

/// Preference backend backed by a map. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceService {
    inner: Arc<RwLock<InnerPreferenceState>>,
}

#[derive(Debug, Default)]
struct InnerPreferenceState {
    snapshots: HashMap<ContentId, PreferenceSnapshot>,
    failing: bool,
    calls: usize,
}

impl InMemoryPreferenceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(
        self,
        content_id: ContentId,
        snapshot: PreferenceSnapshot,
    ) -> Self {
        self.inner.write().snapshots.insert(content_id, snapshot);
        self
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.inner.write().failing = failing;
    }

    pub fn snapshot(&self, content_id: &ContentId) -> PreferenceSnapshot {
        self.inner
            .read()
            .snapshots
            .get(content_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.inner.read().calls
    }

    fn begin_call(&self) -> Result<(), PreferenceError> {
        let mut inner = self.inner.write();
        inner.calls += 1;
        if inner.failing {
            return Err(PreferenceError::Transport(
                "preference backend unavailable".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceService for InMemoryPreferenceService {
    async fn fetch(
        &self,
        content_id: &ContentId,
    ) -> Result<PreferenceSnapshot, PreferenceError> {
        self.begin_call()?;
        Ok(self.snapshot(content_id))
    }

    async fn toggle_like(
        &self,
        content_id: &ContentId,
        action: LikeAction,
    ) -> Result<LikeToggle, PreferenceError> {
        self.begin_call()?;
        let mut inner = self.inner.write();
        let entry = inner.snapshots.entry(content_id.clone()).or_default();
        entry.is_liked = action == LikeAction::Like;
        Ok(LikeToggle {
            success: true,
            is_liked: entry.is_liked,
        })
    }

    async fn toggle_watchlist(
        &self,
        content_id: &ContentId,
        action: WatchlistAction,
    ) -> Result<WatchlistToggle, PreferenceError> {
        self.begin_call()?;
        let mut inner = self.inner.write();
        let entry = inner.snapshots.entry(content_id.clone()).or_default();
        entry.is_in_list = action == WatchlistAction::Add;
        Ok(WatchlistToggle {
            success: true,
            is_in_list: entry.is_in_list,
        })
    }
}
