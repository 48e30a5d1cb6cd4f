/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (bearer auth / trace)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::bearer_auth;
use crate::services::obp::auth::ServiceAuthenticator;
use crate::services::obp::gateway::ObpGateway;
use crate::services::obp::probe;
use crate::services::obp::transport::ObpTransport;
use crate::services::session::memory::InMemorySessionStore;
use crate::services::session::service::SessionService;
use crate::services::session::store::SessionTokenStore;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,moneymate_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;

    // Optional boot-time check of the service-credential path; a dead
    // upstream fails startup rather than surfacing on the first request.
    if config.startup_probe {
        probe::verify_upstream(&state.service_auth, &state.obp).await?;
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level services and inject them into the shared state.
pub fn build_state(config: &Config) -> Result<AppState> {
    let transport = Arc::new(ObpTransport::new(&config.obp)?);
    let gateway = Arc::new(ObpGateway::new(transport.clone()));
    let service_auth = Arc::new(ServiceAuthenticator::new(
        transport,
        config.obp.auth.clone(),
    ));

    let sessions: Arc<dyn SessionTokenStore> = Arc::new(InMemorySessionStore::new());
    let session_service = Arc::new(SessionService::new(gateway.clone(), sessions.clone()));

    Ok(AppState::new(sessions, gateway, session_service, service_auth))
}

pub fn build_router(state: AppState) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    let router = Router::new()
        .route("/health", get(health))
        .merge(api::routes::routes(state.clone()));

    bearer_auth::apply(router, state.clone())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
