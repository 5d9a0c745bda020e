//! Image Upload Handlers
//!
//! Multipart upload of a single image, used by both the profile-image and
//! the post-attachment endpoints. Profile images and attachments land in
//! separate subdirectories; the stored name is the multipart field name
//! plus a fresh UUID, with an extension derived from the declared MIME
//! type, never from the client filename.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Response,
};
use uuid::Uuid;

use crate::application::dto::{public_url, ApiResponse, UploadResponse};
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::shared::validation::FieldErrors;
use crate::startup::AppState;

/// Extension for an accepted image MIME type; `None` rejects the upload.
fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

fn field_error(code: &'static str) -> AppError {
    let mut report = FieldErrors::default();
    report.add("image", code);
    AppError::Validation(report)
}

/// Map a failed field read. Only the body-limit cutoff is a 413; any other
/// multipart defect is a malformed request, reported as a field error.
fn read_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        field_error(codes::INVALID_FORMAT)
    }
}

/// Stored path for an accepted upload: `{dir}/{subdir}/{field}-{uuid}.{ext}`.
fn stored_path(dir: &str, subdir: &str, field: &str, extension: &str) -> String {
    format!(
        "{}/{}/{}-{}.{}",
        dir.trim_end_matches('/'),
        subdir,
        field,
        Uuid::new_v4(),
        extension
    )
}

/// POST /api/v1/users/upload/profile-image
pub async fn upload_profile_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    store_image(&state, multipart, "profile").await
}

/// POST /api/v1/posts/upload/attach-file
pub async fn upload_attach_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    store_image(&state, multipart, "post").await
}

async fn store_image(
    state: &AppState,
    mut multipart: Multipart,
    subdir: &str,
) -> Result<Response, AppError> {
    let field = loop {
        match multipart.next_field().await.map_err(read_error)? {
            Some(field) if field.file_name().is_some() => break field,
            Some(_) => continue,
            None => return Err(field_error(codes::REQUIRED)),
        }
    };

    let field_name = field.name().unwrap_or("image").to_string();
    let content_type = field
        .content_type()
        .ok_or_else(|| field_error(codes::INVALID_FORMAT))?
        .to_string();
    let extension =
        image_extension(&content_type).ok_or_else(|| field_error(codes::INVALID_FORMAT))?;

    let bytes = field.bytes().await.map_err(read_error)?;
    if bytes.len() > state.settings.upload.max_bytes {
        return Err(AppError::PayloadTooLarge);
    }
    if bytes.is_empty() {
        return Err(field_error(codes::REQUIRED));
    }

    let dir = state.settings.upload.dir.trim_end_matches('/');
    tokio::fs::create_dir_all(format!("{dir}/{subdir}"))
        .await
        .map_err(|e| AppError::Internal(format!("Upload directory error: {}", e)))?;

    let file_path = stored_path(dir, subdir, &field_name, extension);
    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("File write error: {}", e)))?;

    tracing::info!(%file_path, size = bytes.len(), "image stored");
    Ok(ApiResponse::created(
        codes::FILE_UPLOAD_SUCCESS,
        UploadResponse {
            file_url: public_url(&file_path),
            file_path,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;
    use test_case::test_case;

    #[test_case("image/jpeg", Some("jpg"))]
    #[test_case("image/jpg", Some("jpg"))]
    #[test_case("image/png", Some("png"))]
    #[test_case("image/gif", Some("gif"))]
    #[test_case("image/webp", Some("webp"))]
    #[test_case("image/svg+xml", None)]
    #[test_case("application/pdf", None)]
    fn only_raster_image_mime_types_are_accepted(mime: &str, expected: Option<&str>) {
        assert_eq!(image_extension(mime), expected);
    }

    #[test]
    fn stored_paths_separate_profiles_from_attachments() {
        let profile = stored_path("public/image/", "profile", "profileImage", "png");
        assert!(profile.starts_with("public/image/profile/profileImage-"));
        assert!(profile.ends_with(".png"));

        let attachment = stored_path("public/image", "post", "postFile", "jpg");
        assert!(attachment.starts_with("public/image/post/postFile-"));
        assert!(attachment.ends_with(".jpg"));
        assert_ne!(
            stored_path("public/image", "post", "postFile", "jpg"),
            attachment
        );
    }

    async fn multipart_from(body: String) -> Multipart {
        let request = Request::builder()
            .header("content-type", "multipart/form-data; boundary=xyz")
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn a_truncated_stream_is_a_field_error_not_a_413() {
        // Opens a file part but ends without the closing boundary.
        let body = "--xyz\r\n\
                    content-disposition: form-data; name=\"profileImage\"; filename=\"a.png\"\r\n\
                    content-type: image/png\r\n\r\n\
                    partial"
            .to_string();

        let mut multipart = multipart_from(body).await;
        let field = multipart.next_field().await.unwrap().unwrap();
        let error = field.bytes().await.unwrap_err();

        assert_ne!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);
        match read_error(error) {
            AppError::Validation(report) => {
                assert_eq!(
                    report.codes_for("image").unwrap(),
                    &[codes::INVALID_FORMAT.to_string()]
                );
            }
            other => panic!("expected a field error, got {other:?}"),
        }
    }
}
