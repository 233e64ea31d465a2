use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use comms::protocol::{OCTET_STREAM, READ_PARAMS_PATH, TEXT_PLAIN, WRITE_PARAMS_PATH, WRITE_SUCCESS};
use log::{debug, error, warn};
use tokio::task::{self, JoinError};

use crate::{optimization::Updater, storage::StoreHandle};

/// Creates the HTTP routes serving the parameters held by `handle`.
///
/// # Arguments
/// * `handle` - The shared parameter store.
/// * `max_payload_bytes` - The largest request body accepted.
///
/// # Returns
/// The router exposing the read and write endpoints.
pub fn router<U: Updater + 'static>(handle: StoreHandle<U>, max_payload_bytes: usize) -> Router {
    Router::new()
        .route(READ_PARAMS_PATH, get(read_params::<U>))
        .route(WRITE_PARAMS_PATH, post(write_params::<U>))
        .layer(DefaultBodyLimit::max(max_payload_bytes))
        .with_state(handle)
}

async fn read_params<U: Updater + 'static>(State(handle): State<StoreHandle<U>>) -> Response {
    match task::spawn_blocking(move || handle.read_params()).await {
        Ok(payload) => ([(header::CONTENT_TYPE, OCTET_STREAM)], payload).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn write_params<U: Updater + 'static>(
    State(handle): State<StoreHandle<U>>,
    body: Bytes,
) -> Response {
    let len = body.len();

    match task::spawn_blocking(move || handle.write_params(&body)).await {
        Ok(Ok(())) => {
            debug!(bytes = len; "write accepted");
            ([(header::CONTENT_TYPE, TEXT_PLAIN)], WRITE_SUCCESS).into_response()
        }
        Ok(Err(e)) => {
            warn!("rejected write of {len} bytes: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: JoinError) -> Response {
    error!("parameter task failed: {e}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
