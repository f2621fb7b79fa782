use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use markdown_garden_engine::{GraphError, IoError};

use crate::pages;

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Not found")]
    NotFound,

    #[error("Failed to read document: {0}")]
    Io(#[from] IoError),

    #[error("Failed to load graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::Io(_) | WebError::Graph(_) | WebError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        }

        let body = match self {
            WebError::NotFound => pages::not_found(),
            _ => pages::server_error(),
        };
        (status, Html(body)).into_response()
    }
}
