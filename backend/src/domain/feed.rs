//! Feed filter, search, and sort pipeline.
//!
//! Pure functions over an in-memory idea list. The pipeline runs in full on
//! every request; with community-sized lists a linear scan is cheaper than
//! maintaining an index.
//!
//! ## Invariants
//! - Tag filtering uses AND semantics: an idea passes only when its tag set
//!   is a superset of the active tag set.
//! - Search is case-insensitive substring containment over title, summary,
//!   tags, and details.
//! - Trending order is deterministic: score descending, then id ascending.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Idea, IdeaId, UserId};

/// Weight applied to upvotes in the trending score.
pub const TRENDING_UPVOTE_WEIGHT: i64 = 2;
/// Weight applied to comments in the trending score.
pub const TRENDING_COMMENT_WEIGHT: i64 = 3;

/// Which slice of the feed the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    /// Every idea, creation order.
    #[default]
    All,
    /// Only ideas the caller has favorited.
    Favorites,
    /// Only ideas the caller owns.
    Mine,
    /// Every idea, ordered by trending score.
    Trending,
}

/// Per-idea engagement tallies used for cards and trending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementCounts {
    pub upvotes: i64,
    pub comments: i64,
    pub favorites: i64,
}

impl EngagementCounts {
    /// Weighted popularity score.
    #[must_use]
    pub const fn trending_score(&self) -> i64 {
        self.upvotes * TRENDING_UPVOTE_WEIGHT + self.comments * TRENDING_COMMENT_WEIGHT
    }
}

/// Active filter state for one feed request.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    /// Tags that must all be present on an idea.
    pub active_tags: BTreeSet<String>,
    /// Lower-cased search needle; `None` disables search.
    pub search: Option<String>,
    /// Feed slice selector.
    pub mode: FeedMode,
}

impl FeedFilter {
    /// Build a filter, normalising the search needle to lower case and
    /// dropping it when blank.
    #[must_use]
    pub fn new(active_tags: BTreeSet<String>, search: Option<&str>, mode: FeedMode) -> Self {
        let search = search
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);
        Self {
            active_tags,
            search,
            mode,
        }
    }
}

/// Caller-specific context the mode filters need.
#[derive(Debug, Clone, Default)]
pub struct FeedViewer {
    /// Authenticated caller, when any.
    pub user_id: Option<UserId>,
    /// Ideas the caller has favorited.
    pub favorite_ids: HashSet<IdeaId>,
}

fn matches_tags(idea: &Idea, active: &BTreeSet<String>) -> bool {
    active.iter().all(|tag| idea.tags.iter().any(|t| t == tag))
}

fn matches_search(idea: &Idea, needle: &str) -> bool {
    idea.title.to_lowercase().contains(needle)
        || idea.summary.to_lowercase().contains(needle)
        || idea.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || idea.details.to_lowercase().contains(needle)
}

fn matches_mode(idea: &Idea, mode: FeedMode, viewer: &FeedViewer) -> bool {
    match mode {
        FeedMode::All | FeedMode::Trending => true,
        FeedMode::Favorites => viewer.favorite_ids.contains(&idea.id),
        FeedMode::Mine => viewer.user_id.is_some_and(|id| idea.user_id == id),
    }
}

/// Apply the full filter pipeline and, for [`FeedMode::Trending`], re-order
/// by trending score.
///
/// Ideas arrive in creation order (id ascending) and keep that order unless
/// trending re-sorts them.
#[must_use]
pub fn filter_ideas(
    ideas: Vec<Idea>,
    filter: &FeedFilter,
    viewer: &FeedViewer,
    counts: &HashMap<IdeaId, EngagementCounts>,
) -> Vec<Idea> {
    let mut kept: Vec<Idea> = ideas
        .into_iter()
        .filter(|idea| matches_tags(idea, &filter.active_tags))
        .filter(|idea| {
            filter
                .search
                .as_deref()
                .is_none_or(|needle| matches_search(idea, needle))
        })
        .filter(|idea| matches_mode(idea, filter.mode, viewer))
        .collect();

    if filter.mode == FeedMode::Trending {
        kept.sort_by(|a, b| {
            let score = |idea: &Idea| {
                counts
                    .get(&idea.id)
                    .copied()
                    .unwrap_or_default()
                    .trending_score()
            };
            score(b).cmp(&score(a)).then(a.id.cmp(&b.id))
        });
    }
    kept
}
