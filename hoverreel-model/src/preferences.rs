//! Per-user preference state shown on the preview (liked / in list).

/// Liked and watchlist flags for one content item.
///
/// `Default` is the safe fallback used whenever a lookup fails: not liked,
/// not in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PreferenceSnapshot {
    pub is_liked: bool,
    pub is_in_list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// Action that flips the current state.
    pub fn toggling(is_liked: bool) -> Self {
        if is_liked {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WatchlistAction {
    Add,
    Remove,
}

impl WatchlistAction {
    pub fn toggling(is_in_list: bool) -> Self {
        if is_in_list {
            WatchlistAction::Remove
        } else {
            WatchlistAction::Add
        }
    }
}

/// Response of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LikeToggle {
    pub success: bool,
    pub is_liked: bool,
}

/// Response of a watchlist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WatchlistToggle {
    pub success: bool,
    pub is_in_list: bool,
}
