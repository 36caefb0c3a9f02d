//! Shared test application setup

use axum_test::TestServer;
use secret_cache_gateway::cache::{Clock, ManualClock, SecretCache};
use secret_cache_gateway::config::ServerConfig;
use secret_cache_gateway::provider::memory::InMemorySecretStore;
use secret_cache_gateway::provider::SecretStoreProvider;
use secret_cache_gateway::secrets::SecretService;
use secret_cache_gateway::server::{build_router, AppState};
use std::sync::Arc;
use std::time::Duration;

pub const TTL: Duration = Duration::from_secs(300);

/// Router under test plus handles on its collaborators
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemorySecretStore>,
    pub clock: Arc<ManualClock>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(&ServerConfig::default())
}

pub fn spawn_app_with(config: &ServerConfig) -> TestApp {
    let store = Arc::new(InMemorySecretStore::new());
    let clock = Arc::new(ManualClock::new());

    let cache = SecretCache::with_clock(TTL, Arc::clone(&clock) as Arc<dyn Clock>);
    let service = SecretService::new(Arc::clone(&store) as Arc<dyn SecretStoreProvider>, cache);
    let router = build_router(AppState::new(service), config);

    let server = TestServer::new(router).expect("Failed to start test server");
    TestApp {
        server,
        store,
        clock,
    }
}
