use crate::blog::PostID;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("required identifier missing")]
    MissingIdentifier,

    #[error("Could not find row {0}")]
    NotFound(PostID),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl BlogError {
    pub fn status(&self) -> StatusCode {
        match self {
            BlogError::MissingIdentifier => StatusCode::BAD_REQUEST,
            BlogError::NotFound(_) => StatusCode::NOT_FOUND,
            BlogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let BlogError::Storage(err) = &self {
            tracing::error!("Error reading from storage: {err}");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
