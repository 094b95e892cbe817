use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::{error_handling::HandleErrorLayer, BoxError};
use sqlx::postgres::PgPoolOptions;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{env::Envy, errors::DefaultApiError},
    store::{CommentStore, MemoryStore, PgStore, PostStore},
};

mod app;
mod comments;
mod posts;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub envy: Arc<Envy>,
}

impl AppState {
    pub fn new<S>(store: S, envy: Envy) -> Self
    where
        S: PostStore + CommentStore + 'static,
    {
        let store = Arc::new(store);

        Self {
            posts: store.clone(),
            comments: store,
            envy: Arc::new(envy),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        let envy = Envy {
            app_env: "test".to_string(),
            port: None,
            database_url: None,
            max_connections: None,
            rate_limit_per_sec: None,
            body_limit_bytes: None,
        };

        Self::new(MemoryStore::new(), envy)
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = envy::from_env::<Envy>()?;

    tracing::info!(app_env = %envy.app_env, "configuration loaded");

    // properties
    let port = envy.port.unwrap_or(3000);
    let rate_limit = envy.rate_limit_per_sec.unwrap_or(50);
    let database_url = envy.database_url.clone();

    let state = match database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(envy.max_connections.unwrap_or(10))
                .idle_timeout(Some(Duration::from_secs(60)))
                .connect(&database_url)
                .await?;

            tracing::info!("connected to db");

            sqlx::migrate!().run(&pool).await?;

            AppState::new(PgStore::new(pool), envy)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using the in-memory store");

            AppState::new(MemoryStore::new(), envy)
        }
    };

    // app
    let app = app::router::router(Arc::new(state)).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|err: BoxError| async move {
                tracing::error!(%err);
                DefaultApiError::ServiceUnavailable.value()
            }))
            .layer(BufferLayer::new(1024))
            .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(1))),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
