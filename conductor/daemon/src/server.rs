//! Contact HTTP Server
//!
//! Routes:
//! - `POST /api/contact` validates a demo request and acknowledges it after
//!   the configured delay
//! - `GET /health` answers `{"status":"ok"}`
//!
//! Submissions are logged and dropped; nothing is stored.

use std::future::Future;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use galaxrx_core::config::{GalaxrxConfig, DEFAULT_CONTACT_DELAY};
use galaxrx_core::contact::{validate_contact, ContactResponse};

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Simulated processing time before a submission is acknowledged
    pub contact_delay: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            contact_delay: DEFAULT_CONTACT_DELAY,
        }
    }
}

impl From<&GalaxrxConfig> for AppState {
    fn from(config: &GalaxrxConfig) -> Self {
        Self {
            contact_delay: config.contact_delay,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the listener fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "Contact server listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/contact`
///
/// The raw body is taken so a malformed payload gets the generic 500 body
/// rather than the framework's own rejection.
async fn submit_contact(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Contact body is not JSON");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::unexpected()),
            )
                .into_response();
        }
    };

    let submission = match validate_contact(&value) {
        Ok(submission) => submission,
        Err(errors) => {
            debug!(issues = errors.len(), "Contact submission rejected");
            return (StatusCode::BAD_REQUEST, Json(ContactResponse::invalid(errors)))
                .into_response();
        }
    };

    tokio::time::sleep(state.contact_delay).await;

    info!(
        name = %submission.name,
        email = %submission.email,
        pharmacy = %submission.pharmacy,
        wants_demo = submission.wants_demo,
        "Contact submission received"
    );

    (StatusCode::OK, Json(ContactResponse::accepted())).into_response()
}
