//! Catalog application library
//!
//! Wires the product store, sessions, and application modules into a
//! registry and serves them over HTTP.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use catalog_db::{fixtures, InMemoryProductStore, ProductStore};
use catalog_http::SessionStore;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Everything the server needs, assembled but not yet serving.
pub struct App {
    pub registry: ModuleRegistry,
    pub store: Arc<dyn ProductStore>,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(store: Arc<dyn ProductStore>, sessions: SessionStore) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, store.clone(), sessions.clone())?;

        Ok(Self {
            registry,
            store,
            sessions,
        })
    }

    /// Build the app from settings: in-memory store seeded with
    /// `catalog.seed_products` demo rows, sessions from `auth.sessions`.
    pub async fn bootstrap(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
        if settings.catalog.seed_products > 0 {
            fixtures::seed(store.as_ref(), settings.catalog.seed_products)
                .await
                .context("failed to seed demo products")?;
        }

        let sessions = SessionStore::from_settings(&settings.auth)?;
        Self::new(store, sessions)
    }

    pub fn router(&self, settings: &Settings) -> Router {
        catalog_http::build_router(&self.registry, settings)
    }
}

/// Bootstrap, serve until shutdown, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        "catalog-app bootstrap starting"
    );

    let app = App::bootstrap(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };

    app.registry.init_all(&ctx).await?;
    app.registry.start_all(&ctx).await?;
    tracing::info!("catalog-app bootstrap complete");

    let served = catalog_http::start_server(&app.registry, &settings).await;
    app.registry.stop_all().await?;
    served
}
