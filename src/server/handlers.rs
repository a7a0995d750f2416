use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Config;
use crate::policy::PolicyRecord;

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// What the handlers serve. Built once before the listener starts.
#[derive(Debug, Clone)]
pub struct Site {
    policy: Arc<PolicyRecord>,
    liveness: String,
}

impl Site {
    pub fn new(config: &Config, policy: Arc<PolicyRecord>) -> Self {
        Self {
            policy,
            liveness: format!("Server is up and running for domain {}", config.domain()),
        }
    }

    pub fn policy(&self) -> &PolicyRecord {
        &self.policy
    }
}

fn text(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, CONTENT_TYPE_TEXT)], body).into_response()
}

pub(crate) async fn liveness_handler(State(site): State<Arc<Site>>) -> Response {
    text(StatusCode::OK, site.liveness.clone())
}

/// `Content-Length` is the byte length of the cached document.
pub(crate) async fn policy_handler(State(site): State<Arc<Site>>) -> Response {
    text(StatusCode::OK, site.policy.as_str().to_owned())
}

pub(crate) async fn not_found_handler() -> Response {
    text(StatusCode::NOT_FOUND, "Not Found".to_string())
}

/// One info line per request: method, path, peer, referer, host, user agent
/// and status.
pub(crate) async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let (referer, host, user_agent) = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        (
            header_value(header::REFERER),
            header_value(header::HOST),
            header_value(header::USER_AGENT),
        )
    };

    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        %peer,
        %referer,
        %host,
        %user_agent,
        status = response.status().as_u16(),
        "request"
    );
    response
}
