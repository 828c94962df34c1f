use poem::{error::ResponseError, http::StatusCode};

use crate::models::PersonId;

#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    #[error("the API request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("author {0} does not exist")]
    AuthorNotFound(PersonId),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl ResponseError for ViewError {
    fn status(&self) -> StatusCode {
        match self {
            ViewError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ViewError::AuthorNotFound(_) => StatusCode::NOT_FOUND,
            ViewError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
