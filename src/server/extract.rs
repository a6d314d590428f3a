use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::errors::AppError;

/// JSON body whose parse failures surface as 400 with the parser's message.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
