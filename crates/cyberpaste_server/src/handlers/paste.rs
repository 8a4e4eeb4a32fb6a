//! Paste HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cyberpaste_core::constants::RAW_TAB_FALLBACK_NAME;
use cyberpaste_core::models::paste::{CreatePasteRequest, CreatePasteResponse, Paste};
use cyberpaste_core::AppError;

const RAW_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Create a new paste.
///
/// # Arguments
/// - `state`: Application state.
/// - `req`: Paste creation payload.
///
/// # Returns
/// `201 Created` with the generated id as JSON.
///
/// # Errors
/// Returns an error if validation or persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    Json(req): Json<CreatePasteRequest>,
) -> Result<Response, HttpError> {
    // Check total paste size limit before the core sees the payload
    let total_size: usize = req.tabs.iter().map(|tab| tab.content.len()).sum();
    if total_size > state.config.max_paste_size {
        return Err(AppError::BadRequest(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        ))
        .into());
    }

    let id = state
        .service
        .create_paste(req.tabs, req.ttl_seconds, req.encrypted)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatePasteResponse { id })).into_response())
}

/// Fetch a paste by id.
///
/// The returned snapshot predates this fetch's own view increment.
///
/// # Arguments
/// - `state`: Application state.
/// - `id`: Paste identifier from the path.
///
/// # Returns
/// The paste as JSON.
///
/// # Errors
/// Returns an error if the paste does not exist, has expired, or lookup
/// fails.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Paste>, HttpError> {
    state
        .service
        .get_paste(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound.into())
}

/// Serve a paste as concatenated plain text.
///
/// Encrypted pastes are refused: the server only holds ciphertext and a raw
/// dump of it would be useless and misleading.
///
/// # Arguments
/// - `state`: Application state.
/// - `id`: Paste identifier from the path.
///
/// # Returns
/// `text/plain` tab blocks, or `403` for encrypted pastes.
///
/// # Errors
/// Returns an error if the paste does not exist, has expired, or lookup
/// fails.
pub async fn raw_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let Some(paste) = state.service.get_paste(&id).await? else {
        return Err(AppError::NotFound.into());
    };

    if paste.encrypted {
        return Ok((
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, RAW_CONTENT_TYPE)],
            "This paste is encrypted and cannot be viewed in raw mode.",
        )
            .into_response());
    }

    Ok((
        [(header::CONTENT_TYPE, RAW_CONTENT_TYPE)],
        render_raw(&paste),
    )
        .into_response())
}

fn render_raw(paste: &Paste) -> String {
    paste
        .tabs
        .iter()
        .map(|tab| {
            let name = if tab.name.is_empty() {
                RAW_TAB_FALLBACK_NAME
            } else {
                tab.name.as_str()
            };
            format!("--- {} ({}) ---\n\n{}", name, tab.lang, tab.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
