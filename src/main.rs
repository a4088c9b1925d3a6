use axum::{
    Router,
    routing::{get, post},
};
use mcpskills::{AppState, auth, blog, catalog, collections, db, index, newsletter, submit};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let db_pool = db::connect(&dotenv::var("DATABASE_URL")?).await?;
    db::migrate(&db_pool).await?;

    let clients_path = dotenv::var("OAUTH_CLIENTS").unwrap_or_else(|_| "client_secret.json".to_string());
    let clients = auth::Clients::load(&clients_path)?;
    let catalog = catalog::Catalog::load()?;

    let app_state = AppState {
        db_pool,
        clients,
        catalog,
    };

    let app = Router::new()
        .route("/", get(index::index))
        .route("/submit", get(submit::submit_page))
        .route("/api/submit", post(submit::submit))
        .route("/api/newsletter", post(newsletter::subscribe))
        .merge(auth::router())
        .merge(catalog::router())
        .nest("/blog", blog::router())
        .nest("/collections", collections::router())
        .nest("/api/collections", collections::api_router().layer(CorsLayer::permissive()))
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on http://0.0.0.0:8080");
    axum::serve(listener, app).await?;

    Ok(())
}
