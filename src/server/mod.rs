//! HTTP front end serving the cached policy.
//!
//! The router only ever sees an already validated [`Config`] and an immutable
//! [`PolicyRecord`]; handlers share them through an `Arc` and cannot fail or
//! stop the process.

mod handlers;

pub use handlers::{CONTENT_TYPE_TEXT, Site};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::policy::PolicyRecord;
use handlers::{liveness_handler, log_request, not_found_handler, policy_handler};

pub const POLICY_PATH: &str = "/.well-known/mta-sts.txt";

/// Upper bound for answering one request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}

/// `GET /` (liveness) and `GET /.well-known/mta-sts.txt` (policy). `HEAD` is
/// answered by the same routes; other methods get 405, other paths 404.
pub fn router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route(POLICY_PATH, get(policy_handler))
        .fallback(not_found_handler)
        .with_state(site)
        .layer(middleware::from_fn(log_request))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
}

/// Bind `config.listen_addr()` and serve `policy` until `shutdown` resolves.
pub async fn run<S>(
    config: &Config,
    policy: Arc<PolicyRecord>,
    shutdown: S,
) -> Result<(), ServerError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = bind(&config.listen_addr()).await?;
    serve(listener, Arc::new(Site::new(config, policy)), shutdown).await
}

/// Serve on `listener` until `shutdown` resolves, then drain open requests.
pub async fn serve<S>(
    listener: TcpListener,
    site: Arc<Site>,
    shutdown: S,
) -> Result<(), ServerError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let local = listener
        .local_addr()
        .map_err(|source| ServerError::Io { source })?;
    tracing::info!(%local, "serving MTA-STS policy");

    axum::serve(
        listener,
        router(site).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown.await;
        tracing::info!("shutting down");
    })
    .await
    .map_err(|source| ServerError::Io { source })
}
