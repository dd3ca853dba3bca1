use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use promptcut_api::auth::session::SessionStore;
use promptcut_api::config::ServerConfig;
use promptcut_api::prompts::PromptLog;
use promptcut_api::router::build_app_router;
use promptcut_api::state::AppState;
use promptcut_client::{EditServiceApi, EditServiceConfig};
use promptcut_core::repository::{EditRequestStore, UserRepository, VideoRepository};
use promptcut_db::{DbPool, MemoryStore, PgStore};
use promptcut_events::EventBus;
use promptcut_pipeline::{EditWorkflow, WorkflowConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired sessions are swept from memory.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(600);

/// The three storage seams, backed by one store.
struct Storage {
    pool: Option<DbPool>,
    users: Arc<dyn UserRepository>,
    videos: Arc<dyn VideoRepository>,
    edit_requests: Arc<dyn EditRequestStore>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "promptcut_api=debug,promptcut_pipeline=debug,promptcut_client=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let storage = open_storage(&config).await;

    // --- Edit service client ---
    let edit_service_config = EditServiceConfig::from_env();
    tracing::info!(base_url = %edit_service_config.base_url, "Edit service configured");
    let edit_service = Arc::new(EditServiceApi::new(edit_service_config));

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // --- Edit workflow ---
    let workflow_config = WorkflowConfig::from_env();
    tracing::info!(
        plan_timeout_secs = workflow_config.plan_timeout.as_secs(),
        process_timeout_secs = workflow_config.process_timeout.as_secs(),
        policy = ?workflow_config.policy,
        "Edit workflow configured",
    );
    let workflow = Arc::new(EditWorkflow::new(
        edit_service.clone(),
        edit_service,
        Arc::clone(&storage.edit_requests),
        Arc::clone(&storage.videos),
        Arc::clone(&event_bus),
        workflow_config,
    ));

    // --- Sessions ---
    let sessions = Arc::new(SessionStore::new(chrono::Duration::minutes(
        config.session_ttl_mins,
    )));
    let purge_handle = {
        let sessions = Arc::clone(&sessions);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                let removed = sessions.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "Purged expired sessions");
                }
            }
        })
    };

    // --- App state ---
    let shutdown = CancellationToken::new();
    let state = AppState {
        config: Arc::new(config.clone()),
        pool: storage.pool,
        users: storage.users,
        videos: storage.videos,
        edit_requests: storage.edit_requests,
        sessions,
        prompts: Arc::new(PromptLog::new()),
        workflow: Arc::clone(&workflow),
        event_bus,
        shutdown: shutdown.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Running edits are cancelled and recorded as failed.
    workflow.shutdown().await;

    purge_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Connect to PostgreSQL when `DATABASE_URL` is set, otherwise use the
/// in-process store.
async fn open_storage(config: &ServerConfig) -> Storage {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage");
        let store = Arc::new(MemoryStore::new());
        return Storage {
            pool: None,
            users: store.clone(),
            videos: store.clone(),
            edit_requests: store,
        };
    };

    let pool = promptcut_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    promptcut_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    promptcut_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(pool.clone()));
    Storage {
        pool: Some(pool),
        users: store.clone(),
        videos: store.clone(),
        edit_requests: store,
    }
}

/// Wait for SIGINT or SIGTERM, then cancel `shutdown` so long-lived
/// responses such as event streams finish and the server can drain.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
    shutdown.cancel();
}
