//! Validation Utilities
//!
//! Per-field rule chains used by the request DTOs, plus the conversion from
//! `validator::ValidationErrors` into the normalized field -> rule-codes map.
//!
//! Every field of a request is evaluated; within one field the chain stops at
//! the first failing rule, so a field reports at most one code per rule kind
//! and never duplicates.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use super::codes;
use super::error::AppError;

/// Email format from the canonical schema: `local@domain.tld`, where local
/// and domain are alphanumeric runs optionally separated by `-`, `_` or `.`.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)[0-9a-z]([-_.]?[0-9a-z])*@[0-9a-z]([-_.]?[0-9a-z])*\.[a-z]{2,3}$")
        .expect("invalid email regex")
});

/// Nicknames are 2-10 characters of Korean syllables, Latin letters or digits.
pub static NICKNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[가-힣a-zA-Z0-9]{2,10}$").expect("invalid nickname regex"));

/// Symbols a password must draw at least one character from.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 20;
const TITLE_MAX: usize = 26;
const POST_CONTENT_MAX: usize = 1500;
const COMMENT_CONTENT_MAX: usize = 1000;

/// Field name -> ordered rule codes, serialized as the `data` payload of a
/// 422 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a rule code for a field, skipping duplicates.
    pub fn add(&mut self, field: &str, code: &str) {
        let entry = self.0.entry(field.to_string()).or_default();
        if !entry.iter().any(|c| c == code) {
            entry.push(code.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn codes_for(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Wrap a non-empty report in `AppError::Validation`; `Ok(())` otherwise.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// Convert collected derive-validation errors to the normalized error map.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut report = FieldErrors::default();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            report.add(field.as_ref(), error.code.as_ref());
        }
    }
    AppError::Validation(report)
}

fn fail(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

// --- rule chains, first failure wins per field ---

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    if !EMAIL_REGEX.is_match(value) {
        return Err(fail(codes::INVALID_FORMAT));
    }
    Ok(())
}

/// 8-20 characters containing a lowercase letter, an uppercase letter, a
/// digit and one of `@$!%*?&`, with no characters outside that set.
///
/// The `regex` crate has no lookaheads, so the rules are expressed as
/// character-class scans instead of a single pattern.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    let len = value.chars().count();
    if len < PASSWORD_MIN {
        return Err(fail(codes::TOO_SHORT));
    }
    if len > PASSWORD_MAX {
        return Err(fail(codes::TOO_LONG));
    }

    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;
    for c in value.chars() {
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            _ if PASSWORD_SYMBOLS.contains(c) => symbol = true,
            _ => return Err(fail(codes::INVALID_FORMAT)),
        }
    }
    if lower && upper && digit && symbol {
        Ok(())
    } else {
        Err(fail(codes::INVALID_FORMAT))
    }
}

pub fn validate_nickname(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    let len = value.chars().count();
    if len < 2 {
        return Err(fail(codes::TOO_SHORT));
    }
    if len > 10 {
        return Err(fail(codes::TOO_LONG));
    }
    if !NICKNAME_REGEX.is_match(value) {
        return Err(fail(codes::INVALID_FORMAT));
    }
    Ok(())
}

fn validate_text(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    if value.chars().count() > max {
        return Err(fail(codes::TOO_LONG));
    }
    Ok(())
}

pub fn validate_post_title(value: &str) -> Result<(), ValidationError> {
    validate_text(value, TITLE_MAX)
}

pub fn validate_post_content(value: &str) -> Result<(), ValidationError> {
    validate_text(value, POST_CONTENT_MAX)
}

pub fn validate_comment_content(value: &str) -> Result<(), ValidationError> {
    validate_text(value, COMMENT_CONTENT_MAX)
}

/// Required integer query parameter (offset, limit).
pub fn validate_int_text(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    if value.parse::<i64>().is_err() {
        return Err(fail(codes::INVALID_FORMAT));
    }
    Ok(())
}

pub fn validate_keyword(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(fail(codes::REQUIRED));
    }
    Ok(())
}

/// Search sort order; absent means `recent`.
pub fn validate_sort(value: &str) -> Result<(), ValidationError> {
    match value {
        "recent" | "relevance" => Ok(()),
        _ => Err(fail(codes::INVALID_FORMAT)),
    }
}

/// Parse a numeric path parameter, reporting `INVALID_FORMAT` on the named
/// field as a 422 rather than a bare 400.
pub fn parse_id_param(field: &str, raw: &str) -> Result<i64, AppError> {
    let mut report = FieldErrors::default();
    if raw.is_empty() {
        report.add(field, codes::REQUIRED);
        return Err(AppError::Validation(report));
    }
    match raw.parse::<i64>() {
        Ok(id) => Ok(id),
        Err(_) => {
            report.add(field, codes::INVALID_FORMAT);
            Err(AppError::Validation(report))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn code_of(result: Result<(), ValidationError>) -> Option<String> {
        result.err().map(|e| e.code.to_string())
    }

    #[test_case("", Some("REQUIRED"); "empty is required")]
    #[test_case("plain", Some("INVALID_FORMAT"); "missing at sign")]
    #[test_case("a@b", Some("INVALID_FORMAT"); "missing tld")]
    #[test_case("user@@example.com", Some("INVALID_FORMAT"); "double at")]
    #[test_case("a@b.com", None; "minimal address")]
    #[test_case("first.last@mail-host.co", None; "dots and dashes")]
    fn email_chain(value: &str, expected: Option<&str>) {
        assert_eq!(code_of(validate_email(value)).as_deref(), expected);
    }

    #[test_case("", Some("REQUIRED"); "empty is required")]
    #[test_case("Ab1!", Some("TOO_SHORT"); "below minimum length")]
    #[test_case("Abcdef1!Abcdef1!Abcde", Some("TOO_LONG"); "above maximum length")]
    #[test_case("abcdefg1!", Some("INVALID_FORMAT"); "no uppercase")]
    #[test_case("ABCDEFG1!", Some("INVALID_FORMAT"); "no lowercase")]
    #[test_case("Abcdefgh!", Some("INVALID_FORMAT"); "no digit")]
    #[test_case("Abcdefg12", Some("INVALID_FORMAT"); "no symbol")]
    #[test_case("Abcdef1! ", Some("INVALID_FORMAT"); "space outside charset")]
    #[test_case("Abcdef1!", None; "meets every rule")]
    fn password_chain(value: &str, expected: Option<&str>) {
        assert_eq!(code_of(validate_password(value)).as_deref(), expected);
    }

    #[test_case("", Some("REQUIRED"); "empty is required")]
    #[test_case("a", Some("TOO_SHORT"); "single character")]
    #[test_case("abcdefghijk", Some("TOO_LONG"); "eleven characters")]
    #[test_case("nick name", Some("INVALID_FORMAT"); "space rejected")]
    #[test_case("유저이름", None; "korean accepted")]
    #[test_case("user01", None; "latin and digits accepted")]
    fn nickname_chain(value: &str, expected: Option<&str>) {
        assert_eq!(code_of(validate_nickname(value)).as_deref(), expected);
    }

    #[test]
    fn title_bounds() {
        assert_eq!(code_of(validate_post_title("")).as_deref(), Some("REQUIRED"));
        assert_eq!(code_of(validate_post_title(&"a".repeat(26))), None);
        assert_eq!(
            code_of(validate_post_title(&"a".repeat(27))).as_deref(),
            Some("TOO_LONG")
        );
    }

    #[test]
    fn content_bounds_differ_between_posts_and_comments() {
        assert_eq!(code_of(validate_post_content(&"a".repeat(1500))), None);
        assert_eq!(
            code_of(validate_post_content(&"a".repeat(1501))).as_deref(),
            Some("TOO_LONG")
        );
        assert_eq!(code_of(validate_comment_content(&"a".repeat(1000))), None);
        assert_eq!(
            code_of(validate_comment_content(&"a".repeat(1001))).as_deref(),
            Some("TOO_LONG")
        );
    }

    #[test_case("", Some("REQUIRED"))]
    #[test_case("abc", Some("INVALID_FORMAT"))]
    #[test_case("12.5", Some("INVALID_FORMAT"))]
    #[test_case("0", None)]
    #[test_case("42", None)]
    fn integer_param_chain(value: &str, expected: Option<&str>) {
        assert_eq!(code_of(validate_int_text(value)).as_deref(), expected);
    }

    #[test]
    fn sort_accepts_only_known_orders() {
        assert_eq!(code_of(validate_sort("recent")), None);
        assert_eq!(code_of(validate_sort("relevance")), None);
        assert_eq!(
            code_of(validate_sort("views")).as_deref(),
            Some("INVALID_FORMAT")
        );
    }

    #[test]
    fn path_param_parse_reports_on_the_named_field() {
        assert_eq!(parse_id_param("post_id", "17").unwrap(), 17);

        let err = parse_id_param("post_id", "abc").unwrap_err();
        match err {
            AppError::Validation(report) => {
                assert_eq!(
                    report.codes_for("post_id").unwrap(),
                    &["INVALID_FORMAT".to_string()]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn field_errors_deduplicate_codes() {
        let mut report = FieldErrors::default();
        report.add("email", codes::REQUIRED);
        report.add("email", codes::REQUIRED);
        report.add("email", codes::INVALID_FORMAT);
        assert_eq!(
            report.codes_for("email").unwrap(),
            &["REQUIRED".to_string(), "INVALID_FORMAT".to_string()]
        );
    }
}
