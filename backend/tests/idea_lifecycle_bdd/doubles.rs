//! In-memory port implementations shared by the lifecycle scenarios.
//!
//! One [`InMemoryStore`] backs every port so scenarios observe their own
//! writes: an idea created through the API shows up in the feed, reactions
//! change the tallies, and registered accounts can log back in.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use backend::domain::ports::{
    CommentRepository, CommentRepositoryError, IdeaRepository, IdeaRepositoryError, LoginService,
    LoginServiceError, ProfileRepository, ProfileRepositoryError, ReactionKind,
    ReactionRepository, ReactionRepositoryError,
};
use backend::domain::{
    ANONYMOUS_AUTHOR, Comment, CommentId, CommentText, Credentials, DisplayName, EngagementCounts,
    Idea, IdeaDraft, IdeaId, Profile, UserId,
};

#[derive(Default)]
struct StoreInner {
    ideas: Vec<Idea>,
    next_idea_id: i64,
    comments: Vec<Comment>,
    next_comment_id: i64,
    favorites: HashSet<(UserId, IdeaId)>,
    upvotes: HashSet<(UserId, IdeaId)>,
    accounts: HashMap<String, (UserId, String)>,
    profiles: HashMap<UserId, Profile>,
}

/// Shared mutable state standing in for the database.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("store lock poisoned")
    }

    /// Id of the earliest stored idea, for steps that run after the response
    /// buffer has been overwritten.
    pub(crate) fn first_idea_id(&self) -> Option<i64> {
        self.lock().ideas.first().map(|idea| idea.id.0)
    }

    fn reactions_of(inner: &StoreInner, kind: ReactionKind) -> &HashSet<(UserId, IdeaId)> {
        match kind {
            ReactionKind::Favorite => &inner.favorites,
            ReactionKind::Upvote => &inner.upvotes,
        }
    }

    fn reactions_of_mut(
        inner: &mut StoreInner,
        kind: ReactionKind,
    ) -> &mut HashSet<(UserId, IdeaId)> {
        match kind {
            ReactionKind::Favorite => &mut inner.favorites,
            ReactionKind::Upvote => &mut inner.upvotes,
        }
    }

    fn author_name(inner: &StoreInner, user_id: UserId) -> String {
        inner
            .profiles
            .get(&user_id)
            .map(|profile| profile.display_name.to_string())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned())
    }
}

#[async_trait]
impl IdeaRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Idea>, IdeaRepositoryError> {
        Ok(self.lock().ideas.clone())
    }

    async fn find_by_id(&self, idea_id: IdeaId) -> Result<Option<Idea>, IdeaRepositoryError> {
        Ok(self.lock().ideas.iter().find(|i| i.id == idea_id).cloned())
    }

    async fn insert(
        &self,
        user_id: UserId,
        draft: &IdeaDraft,
    ) -> Result<Idea, IdeaRepositoryError> {
        let mut inner = self.lock();
        inner.next_idea_id += 1;
        let idea = Idea {
            id: IdeaId(inner.next_idea_id),
            title: draft.title().to_owned(),
            summary: draft.summary().to_owned(),
            details: draft.details().to_owned(),
            tags: draft.tags().to_vec(),
            icon: draft.icon().to_owned(),
            user_id,
            created_at: Utc::now(),
        };
        inner.ideas.push(idea.clone());
        Ok(idea)
    }

    async fn delete(&self, idea_id: IdeaId) -> Result<bool, IdeaRepositoryError> {
        let mut inner = self.lock();
        let before = inner.ideas.len();
        inner.ideas.retain(|i| i.id != idea_id);
        inner.comments.retain(|c| c.idea_id != idea_id);
        inner.favorites.retain(|(_, id)| *id != idea_id);
        inner.upvotes.retain(|(_, id)| *id != idea_id);
        Ok(inner.ideas.len() < before)
    }

    async fn engagement_counts(
        &self,
    ) -> Result<HashMap<IdeaId, EngagementCounts>, IdeaRepositoryError> {
        let inner = self.lock();
        let mut counts: HashMap<IdeaId, EngagementCounts> = HashMap::new();
        for (_, idea_id) in &inner.upvotes {
            counts.entry(*idea_id).or_default().upvotes += 1;
        }
        for (_, idea_id) in &inner.favorites {
            counts.entry(*idea_id).or_default().favorites += 1;
        }
        for comment in &inner.comments {
            counts.entry(comment.idea_id).or_default().comments += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_idea(
        &self,
        idea_id: IdeaId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .iter()
            .filter(|c| c.idea_id == idea_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        comment_id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .cloned())
    }

    async fn insert(
        &self,
        idea_id: IdeaId,
        user_id: UserId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut inner = self.lock();
        inner.next_comment_id += 1;
        let comment = Comment {
            id: CommentId(inner.next_comment_id),
            idea_id,
            user_id,
            text: text.as_ref().to_owned(),
            author: Self::author_name(&inner, user_id),
            created_at: Utc::now(),
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut inner = self.lock();
        let before = inner.comments.len();
        inner.comments.retain(|c| c.id != comment_id);
        Ok(inner.comments.len() < before)
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn is_active(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<bool, ReactionRepositoryError> {
        let inner = self.lock();
        Ok(Self::reactions_of(&inner, kind).contains(&(user_id, idea_id)))
    }

    async fn insert(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        let mut inner = self.lock();
        if !Self::reactions_of_mut(&mut inner, kind).insert((user_id, idea_id)) {
            return Err(ReactionRepositoryError::duplicate(kind, idea_id));
        }
        Ok(())
    }

    async fn remove(
        &self,
        kind: ReactionKind,
        user_id: UserId,
        idea_id: IdeaId,
    ) -> Result<(), ReactionRepositoryError> {
        let mut inner = self.lock();
        Self::reactions_of_mut(&mut inner, kind).remove(&(user_id, idea_id));
        Ok(())
    }

    async fn count_for_idea(
        &self,
        kind: ReactionKind,
        idea_id: IdeaId,
    ) -> Result<i64, ReactionRepositoryError> {
        let inner = self.lock();
        let count = Self::reactions_of(&inner, kind)
            .iter()
            .filter(|(_, id)| *id == idea_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn idea_ids_for_user(
        &self,
        kind: ReactionKind,
        user_id: UserId,
    ) -> Result<HashSet<IdeaId>, ReactionRepositoryError> {
        let inner = self.lock();
        Ok(Self::reactions_of(&inner, kind)
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, id)| *id)
            .collect())
    }
}

#[async_trait]
impl LoginService for InMemoryStore {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, LoginServiceError> {
        let inner = self.lock();
        match inner.accounts.get(credentials.email()) {
            Some((user_id, password)) if password.as_str() == credentials.password() => {
                Ok(*user_id)
            }
            _ => Err(LoginServiceError::InvalidCredentials),
        }
    }

    async fn register(
        &self,
        credentials: &Credentials,
        _display_name: &DisplayName,
    ) -> Result<UserId, LoginServiceError> {
        let mut inner = self.lock();
        if inner.accounts.contains_key(credentials.email()) {
            return Err(LoginServiceError::EmailTaken);
        }
        let user_id = UserId::random();
        inner.accounts.insert(
            credentials.email().to_owned(),
            (user_id, credentials.password().to_owned()),
        );
        Ok(user_id)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.lock().profiles.get(&user_id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        self.lock()
            .profiles
            .insert(profile.user_id, profile.clone());
        Ok(())
    }
}
