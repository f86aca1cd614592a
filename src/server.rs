use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{Chapter, Error, transcribe::Transcriber};

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub title: String,
    pub transcript: String,
    pub chapters: Vec<Chapter>,
    pub duration: u64,
}

/// Pipeline error carried across the HTTP boundary
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        Error::NoTranscript(_) | Error::Http(_) | Error::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(transcriber: Transcriber) -> Router {
    Router::new()
        .route("/api/transcript", post(get_transcript))
        .route("/api/health", get(health))
        .with_state(transcriber)
}

async fn get_transcript(
    State(transcriber): State<Transcriber>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let artifact = transcriber.transcribe(&request.url).await?;

    Ok(Json(TranscriptResponse {
        video_id: artifact.video_id,
        title: artifact.title,
        transcript: artifact.body_text,
        chapters: artifact.chapters,
        duration: artifact.duration_seconds,
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "ytt" }))
}

/// Bind and serve until shutdown
pub async fn serve(addr: &str, transcriber: Transcriber) -> eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on {addr}");
    axum::serve(listener, router(transcriber)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_maps_to_bad_request() {
        assert_eq!(status_for(&Error::InvalidUrl("x".into())), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        assert_eq!(
            status_for(&Error::NoTranscript("abc".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::Provider("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_request_deserializes() {
        let req: TranscriptRequest =
            serde_json::from_str(r#"{"url": "https://youtu.be/dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(req.url, "https://youtu.be/dQw4w9WgXcQ");
    }
}
