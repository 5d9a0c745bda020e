//! Request DTOs
//!
//! Incoming request bodies and query strings with their validation rules.
//! String fields default to empty on missing keys so an absent field reports
//! `REQUIRED` instead of failing deserialization with a bare 400.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::domain::{AttachmentChange, SearchSort};
use crate::shared::validation as rules;

/// Distinguishes an absent field from an explicit null.
///
/// Missing key -> `None` (via `#[serde(default)]`), `null` -> `Some(None)`,
/// value -> `Some(Some(v))`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Signup request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_email))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_password))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_nickname))]
    pub nickname: String,

    /// Server-relative path returned by the upload endpoint, if the client
    /// attached a profile image.
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_email))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_password))]
    pub password: String,
}

/// Profile update body. The profile image is tri-state: absent keeps the
/// current image, null removes it, a path replaces it.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_nickname))]
    pub nickname: String,

    #[serde(default, deserialize_with = "double_option")]
    pub profile_image_url: Option<Option<String>>,
}

/// Password change body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_password))]
    pub password: String,
}

/// New post body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WritePostRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_post_title))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_post_content))]
    pub content: String,

    /// Server-relative path returned by the upload endpoint.
    #[serde(default)]
    pub attach_file_url: Option<String>,
}

/// Post update body; the attachment field is tri-state like the profile
/// image on [`UpdateUserRequest`].
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_post_title))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_post_content))]
    pub content: String,

    #[serde(default, deserialize_with = "double_option")]
    pub attach_file_url: Option<Option<String>>,
}

impl UpdatePostRequest {
    pub fn attachment_change(&self) -> AttachmentChange {
        match &self.attach_file_url {
            None => AttachmentChange::Keep,
            Some(None) => AttachmentChange::Remove,
            Some(Some(path)) => AttachmentChange::Replace(path.clone()),
        }
    }
}

/// New or updated comment body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WriteCommentRequest {
    #[serde(default)]
    #[validate(custom(function = rules::validate_comment_content))]
    pub content: String,
}

/// Pagination query string. Values arrive as text and are validated before
/// being parsed, so a malformed value reports `INVALID_FORMAT` on its field.
#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default)]
    #[validate(custom(function = rules::validate_int_text))]
    pub offset: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_int_text))]
    pub limit: String,
}

impl PageQuery {
    /// (offset, limit) after validation. Negative offsets clamp to zero and
    /// the limit is capped to keep a single page bounded.
    pub fn page(&self) -> (i64, i64) {
        let offset = self.offset.parse::<i64>().unwrap_or(0).max(0);
        let limit = self.limit.parse::<i64>().unwrap_or(0).clamp(1, 100);
        (offset, limit)
    }
}

/// Search query string.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    #[validate(custom(function = rules::validate_keyword))]
    pub keyword: String,

    /// Absent means `recent`.
    #[validate(custom(function = rules::validate_sort))]
    pub sort: Option<String>,

    #[serde(default)]
    #[validate(custom(function = rules::validate_int_text))]
    pub offset: String,

    #[serde(default)]
    #[validate(custom(function = rules::validate_int_text))]
    pub limit: String,
}

impl SearchQuery {
    pub fn sort_order(&self) -> SearchSort {
        self.sort
            .as_deref()
            .and_then(SearchSort::parse)
            .unwrap_or(SearchSort::Recent)
    }

    pub fn page(&self) -> (i64, i64) {
        let offset = self.offset.parse::<i64>().unwrap_or(0).max(0);
        let limit = self.limit.parse::<i64>().unwrap_or(0).clamp(1, 100);
        (offset, limit)
    }
}

/// Email availability probe.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckEmailQuery {
    #[serde(default)]
    #[validate(custom(function = rules::validate_email))]
    pub email: String,
}

/// Nickname availability probe.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckNicknameQuery {
    #[serde(default)]
    #[validate(custom(function = rules::validate_nickname))]
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::codes;
    use crate::shared::error::AppError;
    use crate::shared::validation::validation_error;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_deserialize_to_empty_and_fail_as_required() {
        let request: SignupRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.email, "");

        let errors = request.validate().unwrap_err();
        let report = errors.field_errors();
        assert!(report.contains_key("email"));
        assert!(report.contains_key("password"));
        assert!(report.contains_key("nickname"));
    }

    #[test]
    fn only_the_failing_fields_appear_in_the_report() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"email":"","password":"Ab1!","nickname":"tester"}"#,
        )
        .unwrap();

        match validation_error(request.validate().unwrap_err()) {
            AppError::Validation(report) => {
                assert_eq!(report.fields().collect::<Vec<_>>(), ["email", "password"]);
                assert_eq!(
                    report.codes_for("email").unwrap(),
                    &[codes::REQUIRED.to_string()]
                );
                assert_eq!(
                    report.codes_for("password").unwrap(),
                    &[codes::TOO_SHORT.to_string()]
                );
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn attachment_field_is_tri_state() {
        let keep: UpdatePostRequest =
            serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(keep.attachment_change(), AttachmentChange::Keep);

        let remove: UpdatePostRequest =
            serde_json::from_str(r#"{"title":"t","content":"c","attachFileUrl":null}"#).unwrap();
        assert_eq!(remove.attachment_change(), AttachmentChange::Remove);

        let replace: UpdatePostRequest = serde_json::from_str(
            r#"{"title":"t","content":"c","attachFileUrl":"public/image/a.png"}"#,
        )
        .unwrap();
        assert_eq!(
            replace.attachment_change(),
            AttachmentChange::Replace("public/image/a.png".to_string())
        );
    }

    #[test]
    fn page_query_clamps_bounds() {
        let query = PageQuery {
            offset: "-5".to_string(),
            limit: "1000".to_string(),
        };
        assert_eq!(query.page(), (0, 100));

        let query = PageQuery {
            offset: "20".to_string(),
            limit: "10".to_string(),
        };
        assert_eq!(query.page(), (20, 10));
    }

    #[test]
    fn search_sort_defaults_to_recent() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"keyword":"hello","offset":"0","limit":"10"}"#).unwrap();
        assert!(query.validate().is_ok());
        assert_eq!(query.sort_order(), SearchSort::Recent);

        let query: SearchQuery = serde_json::from_str(
            r#"{"keyword":"hello","sort":"relevance","offset":"0","limit":"10"}"#,
        )
        .unwrap();
        assert_eq!(query.sort_order(), SearchSort::Relevance);
    }

    #[test]
    fn unknown_sort_fails_validation() {
        let query: SearchQuery = serde_json::from_str(
            r#"{"keyword":"hello","sort":"views","offset":"0","limit":"10"}"#,
        )
        .unwrap();
        let errors = query.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sort"));
    }
}
