use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::{
    error::AppError,
    message::RelayResponse,
    services::relay::{parse_messages, relay},
    state::SharedState,
};

/// Single entry point for every method on the relay path.
pub async fn chat_handler(
    method: Method,
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let client = state.completions.as_ref().ok_or(AppError::MissingApiKey)?;

    let messages = parse_messages(&body)?;
    let reply = relay(client, messages).await?;

    Ok(Json(RelayResponse::Reply { reply }).into_response())
}
