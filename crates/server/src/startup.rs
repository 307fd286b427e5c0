use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use models::TransitionPolicy;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{
    file::luggage_store::FileLuggageStore,
    luggage::{InMemoryLuggageStore, LifecyclePolicy, LuggageService, LuggageStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn lifecycle_policy(cfg: &AppConfig) -> LifecyclePolicy {
    let transitions = if cfg.lifecycle.strict_transitions {
        TransitionPolicy::Strict
    } else {
        TransitionPolicy::Lenient
    };
    LifecyclePolicy { transitions, owner_only_removal: cfg.lifecycle.owner_only_removal }
}

async fn open_store(cfg: &AppConfig) -> Result<Arc<dyn LuggageStore>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::File => {
            let path = cfg.storage.data_file.as_str();
            common::env::ensure_data_dir(path).await?;
            let store: Arc<dyn LuggageStore> = FileLuggageStore::new(path).await?;
            let records = store.count().await?;
            info!(path, records, "luggage store opened");
            Ok(store)
        }
        StorageBackend::Memory => {
            warn!("memory storage backend selected; records are lost on restart");
            Ok(Arc::new(InMemoryLuggageStore::new()))
        }
    }
}

/// Open the configured store and wire the lifecycle service into handler state.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let store = open_store(cfg).await?;
    let policy = lifecycle_policy(cfg);
    info!(transitions = ?policy.transitions, owner_only_removal = policy.owner_only_removal, "lifecycle policy");
    if cfg.admin.api_key.is_none() {
        warn!("no admin api key configured; admin routes are disabled");
    }
    let luggage = Arc::new(LuggageService::with_policy(store, policy));
    Ok(AppState::new(luggage, cfg.admin.api_key.clone()))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: build the app and serve until `shutdown` resolves
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "luggage tracker listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("luggage tracker stopped");
    Ok(())
}
