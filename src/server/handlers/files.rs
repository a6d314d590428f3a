use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;

use crate::errors::AppError;
use crate::server::app::AppState;

pub const UPLOAD_FIELD: &str = "file";

const RFC5987_ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_path: String,
}

pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let path = state.files.save(&original_name, field).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                file_path: path.display().to_string(),
            }),
        ));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field `{}`",
        UPLOAD_FIELD
    )))
}

pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let names = state.files.list().await?;
    Ok(Json(names))
}

pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let file = state.files.open(&filename).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(&filename))
            .map_err(|err| AppError::Internal(err.to_string()))?,
    );

    Ok((headers, Body::from_stream(ReaderStream::new(file))))
}

/// Quoted ASCII fallback plus an RFC 5987 `filename*` for the exact name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let encoded: String = utf8_percent_encode(filename, RFC5987_ATTR_CHAR).collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<StatusCode, AppError> {
    state.files.remove(&filename).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_name() {
        assert_eq!(
            content_disposition("1700000000-report.txt"),
            "attachment; filename=\"1700000000-report.txt\"; filename*=UTF-8''1700000000-report.txt"
        );
    }

    #[test]
    fn test_content_disposition_escapes_unsafe_characters() {
        let value = content_disposition("say \"hi\"\u{7}.txt");
        assert_eq!(
            value,
            "attachment; filename=\"say _hi__.txt\"; filename*=UTF-8''say%20%22hi%22%07.txt"
        );
        assert!(HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_content_disposition_non_ascii_name() {
        let value = content_disposition("résumé.pdf");
        assert_eq!(
            value,
            "attachment; filename=\"r_sum_.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
        );
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
