//! HTTP request listener.
//!
//! `POST /` takes one JSON request body and answers `201 {"success": true}`
//! when the message was queued, or `400 {"success": false, "error": ..}` for
//! a malformed or invalid body. A full inbox answers `503`.

use std::io;
use std::net::TcpListener;

use axum::{Json, Router};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use lighthaus_composer::{ControlSender, Instant, ScheduleInterpolator};
use serde_json::json;
use tracing::{info, warn};

use crate::error::RequestError;
use crate::request::parse_message;

type Sender<const SIZE: usize> = ControlSender<'static, ScheduleInterpolator, SIZE>;

/// Routes of the request listener
pub fn router<const SIZE: usize>(sender: Sender<SIZE>) -> Router {
    Router::new()
        .route("/", post(set_user_gradient::<SIZE>))
        .with_state(sender)
}

/// Serve requests on `listener` until the runtime fails
///
/// Runs its own single-threaded runtime, so it can live on a plain thread.
pub fn serve<const SIZE: usize>(listener: TcpListener, sender: Sender<SIZE>) -> io::Result<()> {
    listener.set_nonblocking(true)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::from_std(listener)?;
        axum::serve(listener, router(sender)).await
    })
}

async fn set_user_gradient<const SIZE: usize>(
    State(sender): State<Sender<SIZE>>,
    body: String,
) -> Response {
    match handle_body(&body, &sender) {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "success": true }))).into_response(),
        Err(error) => {
            warn!(%error, request = %body, "received bad request");
            let status = match error {
                RequestError::InboxFull => StatusCode::SERVICE_UNAVAILABLE,
                RequestError::Json(_) | RequestError::Invalid(_) => StatusCode::BAD_REQUEST,
            };
            let reply = json!({ "success": false, "error": error.to_string() });
            (status, Json(reply)).into_response()
        }
    }
}

/// Decode, validate and enqueue one request body
pub fn handle_body<const SIZE: usize>(
    body: &str,
    sender: &ControlSender<'_, ScheduleInterpolator, SIZE>,
) -> Result<(), RequestError> {
    let message = parse_message(body, Instant::now())?;
    info!(?message, "received request");
    sender
        .try_send(message)
        .map_err(|_| RequestError::InboxFull)
}
