//! Idea domain services.
//!
//! Implements the feed, idea CRUD, and share-link operations over the
//! persistence ports. The feed is deliberately forgiving: a repository
//! failure logs an error and yields an empty snapshot so the browse surface
//! renders instead of erroring.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::error;
use url::Url;

use crate::domain::ports::{
    IdeaRepository, IdeaRepositoryError, ReactionKind, ReactionRepository,
    ReactionRepositoryError,
};
use crate::domain::{
    EngagementCounts, Error, FeedFilter, FeedMode, FeedViewer, Idea, IdeaDraft, IdeaId, UserId,
    filter_ideas, share_url,
};

/// Everything one feed render needs: the filtered ideas, their engagement
/// tallies, and the viewer's own reaction sets.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub ideas: Vec<Idea>,
    pub counts: HashMap<IdeaId, EngagementCounts>,
    pub viewer_favorites: HashSet<IdeaId>,
    pub viewer_upvotes: HashSet<IdeaId>,
}

/// Idea service implementing feed assembly, CRUD, and share links.
///
/// The repository parameters accept unsized types so the HTTP state can hold
/// the service over `dyn` ports.
pub struct IdeaService<I: ?Sized, R: ?Sized> {
    ideas: Arc<I>,
    reactions: Arc<R>,
}

impl<I: ?Sized, R: ?Sized> Clone for IdeaService<I, R> {
    fn clone(&self) -> Self {
        Self {
            ideas: Arc::clone(&self.ideas),
            reactions: Arc::clone(&self.reactions),
        }
    }
}

impl<I: ?Sized, R: ?Sized> IdeaService<I, R> {
    /// Create a new service with the given repositories.
    pub fn new(ideas: Arc<I>, reactions: Arc<R>) -> Self {
        Self { ideas, reactions }
    }
}

impl<I, R> IdeaService<I, R>
where
    I: IdeaRepository + ?Sized,
    R: ReactionRepository + ?Sized,
{
    fn map_idea_error(error: IdeaRepositoryError) -> Error {
        match error {
            IdeaRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("idea repository unavailable: {message}"))
            }
            IdeaRepositoryError::Query { message } => {
                Error::internal(format!("idea repository error: {message}"))
            }
        }
    }

    fn map_reaction_error(error: ReactionRepositoryError) -> Error {
        match error {
            ReactionRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("reaction repository unavailable: {message}"))
            }
            ReactionRepositoryError::Query { message } => {
                Error::internal(format!("reaction repository error: {message}"))
            }
            ReactionRepositoryError::Duplicate { kind, idea_id } => Error::conflict(format!(
                "duplicate {} for idea {idea_id}",
                kind.as_str()
            )),
        }
    }

    async fn assemble_feed(
        &self,
        filter: &FeedFilter,
        viewer_id: Option<UserId>,
    ) -> Result<FeedSnapshot, Error> {
        let ideas = self.ideas.list().await.map_err(Self::map_idea_error)?;
        let counts = self
            .ideas
            .engagement_counts()
            .await
            .map_err(Self::map_idea_error)?;

        let (viewer_favorites, viewer_upvotes) = match viewer_id {
            Some(user_id) => {
                let favorites = self
                    .reactions
                    .idea_ids_for_user(ReactionKind::Favorite, user_id)
                    .await
                    .map_err(Self::map_reaction_error)?;
                let upvotes = self
                    .reactions
                    .idea_ids_for_user(ReactionKind::Upvote, user_id)
                    .await
                    .map_err(Self::map_reaction_error)?;
                (favorites, upvotes)
            }
            None => (HashSet::new(), HashSet::new()),
        };

        let viewer = FeedViewer {
            user_id: viewer_id,
            favorite_ids: viewer_favorites.clone(),
        };
        let ideas = filter_ideas(ideas, filter, &viewer, &counts);

        Ok(FeedSnapshot {
            ideas,
            counts,
            viewer_favorites,
            viewer_upvotes,
        })
    }

    /// Assemble the feed for one request.
    ///
    /// Repository failures are logged and degrade to an empty snapshot;
    /// browsing must survive a flaky backend.
    pub async fn feed(&self, filter: &FeedFilter, viewer_id: Option<UserId>) -> FeedSnapshot {
        match self.assemble_feed(filter, viewer_id).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                error!(%error, mode = ?filter.mode, "feed assembly failed, serving empty feed");
                FeedSnapshot::default()
            }
        }
    }

    /// Fetch a single idea.
    ///
    /// # Errors
    /// Returns a `not_found` [`Error`] when no idea has this id.
    pub async fn get(&self, idea_id: IdeaId) -> Result<Idea, Error> {
        self.ideas
            .find_by_id(idea_id)
            .await
            .map_err(Self::map_idea_error)?
            .ok_or_else(|| Error::not_found(format!("no idea with id {idea_id}")))
    }

    /// Publish a validated draft owned by `user_id`.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn create(&self, user_id: UserId, draft: &IdeaDraft) -> Result<Idea, Error> {
        self.ideas
            .insert(user_id, draft)
            .await
            .map_err(Self::map_idea_error)
    }

    /// Delete an idea the caller owns.
    ///
    /// # Errors
    /// Returns `not_found` when the idea does not exist and `forbidden` when
    /// the caller is not its owner. Ownership is checked here, never trusted
    /// from the client.
    pub async fn delete(&self, user_id: UserId, idea_id: IdeaId) -> Result<(), Error> {
        let idea = self.get(idea_id).await?;
        if idea.user_id != user_id {
            return Err(Error::forbidden("only the owner may delete an idea"));
        }
        self.ideas
            .delete(idea_id)
            .await
            .map_err(Self::map_idea_error)?;
        Ok(())
    }

    /// Build the canonical share link for an existing idea.
    ///
    /// # Errors
    /// Returns `not_found` when the idea does not exist.
    pub async fn share_link(&self, base: &Url, idea_id: IdeaId) -> Result<Url, Error> {
        self.get(idea_id).await?;
        Ok(share_url(base, idea_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureReactionRepository, MockIdeaRepository, MockReactionRepository,
    };
    use crate::domain::{ErrorCode, FeedMode};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn idea(id: i64, owner: UserId) -> Idea {
        Idea {
            id: IdeaId(id),
            title: format!("Idea {id}"),
            summary: "summary".into(),
            details: String::new(),
            tags: vec![],
            icon: "💡".into(),
            user_id: owner,
            created_at: Utc::now(),
        }
    }

    fn make_service(
        ideas: MockIdeaRepository,
    ) -> IdeaService<MockIdeaRepository, FixtureReactionRepository> {
        IdeaService::new(Arc::new(ideas), Arc::new(FixtureReactionRepository))
    }

    /// Collects formatted log output so tests can assert on emitted events.
    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("capture lock");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn feed_survives_repository_failure_with_empty_snapshot() {
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_list()
            .times(1)
            .return_once(|| Err(IdeaRepositoryError::connection("db down")));

        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = make_service(ideas);
        let filter = FeedFilter::new(BTreeSet::new(), None, FeedMode::All);
        let snapshot = service.feed(&filter, None).await;
        assert!(snapshot.ideas.is_empty());
        assert!(snapshot.counts.is_empty());

        let logs = writer.contents();
        assert!(
            logs.contains("ERROR") && logs.contains("feed assembly failed"),
            "expected an error event for the degraded feed, got: {logs}"
        );
    }

    #[tokio::test]
    async fn feed_skips_reaction_lookups_for_anonymous_viewers() {
        let owner = UserId::random();
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_list()
            .times(1)
            .return_once(move || Ok(vec![idea(1, owner)]));
        ideas
            .expect_engagement_counts()
            .times(1)
            .return_once(|| Ok(HashMap::new()));
        let mut reactions = MockReactionRepository::new();
        reactions.expect_idea_ids_for_user().times(0);

        let service = IdeaService::new(Arc::new(ideas), Arc::new(reactions));
        let filter = FeedFilter::new(BTreeSet::new(), None, FeedMode::All);
        let snapshot = service.feed(&filter, None).await;
        assert_eq!(snapshot.ideas.len(), 1);
    }

    #[tokio::test]
    async fn feed_collects_viewer_reactions_when_authenticated() {
        let viewer = UserId::random();
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_list()
            .times(1)
            .return_once(move || Ok(vec![idea(1, viewer), idea(2, viewer)]));
        ideas
            .expect_engagement_counts()
            .times(1)
            .return_once(|| Ok(HashMap::new()));
        let mut reactions = MockReactionRepository::new();
        reactions
            .expect_idea_ids_for_user()
            .withf(|kind, _| *kind == ReactionKind::Favorite)
            .times(1)
            .return_once(|_, _| Ok([IdeaId(2)].into_iter().collect()));
        reactions
            .expect_idea_ids_for_user()
            .withf(|kind, _| *kind == ReactionKind::Upvote)
            .times(1)
            .return_once(|_, _| Ok([IdeaId(1)].into_iter().collect()));

        let service = IdeaService::new(Arc::new(ideas), Arc::new(reactions));
        let filter = FeedFilter::new(BTreeSet::new(), None, FeedMode::Favorites);
        let snapshot = service.feed(&filter, Some(viewer)).await;
        assert_eq!(
            snapshot.ideas.iter().map(|i| i.id.0).collect::<Vec<_>>(),
            [2]
        );
        assert!(snapshot.viewer_upvotes.contains(&IdeaId(1)));
    }

    #[tokio::test]
    async fn get_maps_missing_idea_to_not_found() {
        let mut ideas = MockIdeaRepository::new();
        ideas.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = make_service(ideas);
        let error = service.get(IdeaId(7)).await.expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_rejects_non_owners() {
        let owner = UserId::random();
        let intruder = UserId::random();
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(idea(1, owner))));
        ideas.expect_delete().times(0);

        let service = make_service(ideas);
        let error = service
            .delete(intruder, IdeaId(1))
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn delete_removes_an_owned_idea() {
        let owner = UserId::random();
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(idea(1, owner))));
        ideas.expect_delete().times(1).return_once(|_| Ok(true));

        let service = make_service(ideas);
        service
            .delete(owner, IdeaId(1))
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn share_link_requires_the_idea_to_exist() {
        let mut ideas = MockIdeaRepository::new();
        ideas.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = make_service(ideas);
        let base = Url::parse("https://ideas.example/explore").expect("valid base");
        let error = service
            .share_link(&base, IdeaId(5))
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn share_link_appends_the_idea_parameter() {
        let owner = UserId::random();
        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(idea(5, owner))));

        let service = make_service(ideas);
        let base = Url::parse("https://ideas.example/explore").expect("valid base");
        let link = service
            .share_link(&base, IdeaId(5))
            .await
            .expect("link builds");
        assert_eq!(link.as_str(), "https://ideas.example/explore?idea=5");
    }
}
