//! Server harness and shared world for the idea lifecycle scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;

use backend::Trace;
use backend::domain::ports::{FixtureGenerationSource, FixtureTokenVerifier};
use backend::inbound::http::comments::{add_comment, delete_comment, list_comments};
use backend::inbound::http::generate::{generate_idea, generate_idea_preflight};
use backend::inbound::http::ideas::{
    create_idea, delete_idea, get_idea, list_ideas, share_idea,
};
use backend::inbound::http::reactions::{toggle_favorite, toggle_upvote};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::users::{current_user, login, logout, signup, update_profile};

use crate::doubles::InMemoryStore;

pub(crate) struct LifecycleWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: InMemoryStore,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) session_cookie: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<LifecycleWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_lifecycle_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(login)
            .service(signup)
            .service(logout)
            .service(current_user)
            .service(update_profile)
            .service(list_ideas)
            .service(create_idea)
            .service(get_idea)
            .service(delete_idea)
            .service(share_idea)
            .service(list_comments)
            .service(add_comment)
            .service(delete_comment)
            .service(toggle_favorite)
            .service(toggle_upvote)
            .service(generate_idea)
            .service(generate_idea_preflight);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let store = InMemoryStore::new();
    let http_state = HttpState::new(HttpStatePorts {
        ideas: Arc::new(store.clone()),
        comments: Arc::new(store.clone()),
        reactions: Arc::new(store.clone()),
        profiles: Arc::new(store.clone()),
        login: Arc::new(store.clone()),
        tokens: Arc::new(FixtureTokenVerifier),
        generation: Arc::new(FixtureGenerationSource),
        share_base: Url::parse("http://localhost:8080/").expect("share base parses"),
        system_prompt: None,
    });

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_lifecycle_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(LifecycleWorld {
        runtime,
        local,
        base_url,
        server,
        store,
        last_status: None,
        last_body: None,
        session_cookie: None,
    }));

    WorldFixture { world }
}
