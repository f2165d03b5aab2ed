//! Asynchronous liked / watchlist lookups.
//!
//! The controller never awaits the backend itself. It hands out owned
//! [`PreferenceRequest`]s; the driver runs them on whatever executor it has
//! and feeds the [`PreferenceOutcome`] back. Each request carries the
//! liveness token of the session that issued it, so outcomes for a closed
//! preview are dropped on arrival.

use std::sync::Arc;

use hoverreel_model::{
    ContentId, LikeAction, LikeToggle, PreferenceSnapshot, WatchlistAction,
    WatchlistToggle,
};
use tokio::task::JoinHandle;

use crate::collaborators::PreferenceService;
use crate::scheduling::LivenessToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceOp {
    Fetch,
    Like(LikeAction),
    Watchlist(WatchlistAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceResult {
    Fetched(PreferenceSnapshot),
    Liked(LikeToggle),
    Watchlist(WatchlistToggle),
    /// The backend failed. Never retried.
    Failed(String),
    /// The session closed before the request ran.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PreferenceRequest {
    content_id: ContentId,
    op: PreferenceOp,
    token: LivenessToken,
}

impl PreferenceRequest {
    pub(crate) fn new(
        content_id: ContentId,
        op: PreferenceOp,
        token: LivenessToken,
    ) -> Self {
        Self {
            content_id,
            op,
            token,
        }
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn op(&self) -> PreferenceOp {
        self.op
    }

    /// The issuing session is still open.
    pub fn is_live(&self) -> bool {
        self.token.is_alive()
    }

    pub async fn run(self, service: &dyn PreferenceService) -> PreferenceOutcome {
        if !self.token.is_alive() {
            return self.finish(PreferenceResult::Cancelled);
        }

        let result = match self.op {
            PreferenceOp::Fetch => service
                .fetch(&self.content_id)
                .await
                .map(PreferenceResult::Fetched),
            PreferenceOp::Like(action) => service
                .toggle_like(&self.content_id, action)
                .await
                .map(PreferenceResult::Liked),
            PreferenceOp::Watchlist(action) => service
                .toggle_watchlist(&self.content_id, action)
                .await
                .map(PreferenceResult::Watchlist),
        };

        let result = result.unwrap_or_else(|err| {
            log::warn!(
                "preference {:?} for {} failed: {err}",
                self.op,
                self.content_id
            );
            PreferenceResult::Failed(err.to_string())
        });
        self.finish(result)
    }

    /// Run on the current tokio runtime.
    pub fn spawn(
        self,
        service: Arc<dyn PreferenceService>,
    ) -> JoinHandle<PreferenceOutcome> {
        tokio::spawn(async move { self.run(service.as_ref()).await })
    }

    fn finish(self, result: PreferenceResult) -> PreferenceOutcome {
        PreferenceOutcome {
            content_id: self.content_id,
            op: self.op,
            token: self.token,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceOutcome {
    pub content_id: ContentId,
    pub op: PreferenceOp,
    pub(crate) token: LivenessToken,
    pub result: PreferenceResult,
}

impl PreferenceOutcome {
    pub fn is_live(&self) -> bool {
        self.token.is_alive()
    }
}
