//! Wire Codes
//!
//! Every response body carries a `code` string in the `{code, data}`
//! envelope. Success and error codes are collected here so handlers,
//! services and tests agree on the exact spelling.

// --- auth ---
pub const SIGNUP_SUCCESS: &str = "SIGNUP_SUCCESS";
pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
pub const LOGOUT_SUCCESS: &str = "LOGOUT_SUCCESS";
pub const AUTH_SUCCESS: &str = "AUTH_SUCCESS";

// --- users ---
pub const GET_USER_SUCCESS: &str = "GET_USER_SUCCESS";
pub const UPDATE_USER_DATA_SUCCESS: &str = "UPDATE_USER_DATA_SUCCESS";
pub const CHANGE_PASSWORD_SUCCESS: &str = "CHANGE_PASSWORD_SUCCESS";
pub const DELETE_USER_SUCCESS: &str = "DELETE_USER_SUCCESS";
pub const AVAILABLE_EMAIL: &str = "AVAILABLE_EMAIL";
pub const AVAILABLE_NICKNAME: &str = "AVAILABLE_NICKNAME";

// --- posts ---
pub const POSTS_RETRIEVED: &str = "POSTS_RETRIEVED";
pub const POST_RETRIEVED: &str = "POST_RETRIEVED";
pub const WRITE_POST_SUCCESS: &str = "WRITE_POST_SUCCESS";
pub const UPDATE_POST_SUCCESS: &str = "UPDATE_POST_SUCCESS";
pub const DELETE_POST_SUCCESS: &str = "DELETE_POST_SUCCESS";
pub const LIKE_POST_SUCCESS: &str = "LIKE_POST_SUCCESS";
pub const UNLIKE_POST_SUCCESS: &str = "UNLIKE_POST_SUCCESS";

// --- comments ---
pub const COMMENTS_RETRIEVED: &str = "COMMENTS_RETRIEVED";
pub const WRITE_COMMENT_SUCCESS: &str = "WRITE_COMMENT_SUCCESS";
pub const COMMENT_UPDATED: &str = "COMMENT_UPDATED";
pub const COMMENT_DELETED: &str = "COMMENT_DELETED";

// --- files ---
pub const FILE_UPLOAD_SUCCESS: &str = "FILE_UPLOAD_SUCCESS";

// --- errors ---
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const REQUIRED_AUTHORIZATION: &str = "REQUIRED_AUTHORIZATION";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const NOT_FOUND_USER: &str = "NOT_FOUND_USER";
pub const POST_NOT_FOUND: &str = "POST_NOT_FOUND";
pub const COMMENT_NOT_FOUND: &str = "COMMENT_NOT_FOUND";
pub const ALREADY_EXIST_EMAIL: &str = "ALREADY_EXIST_EMAIL";
pub const ALREADY_EXIST_NICKNAME: &str = "ALREADY_EXIST_NICKNAME";
pub const ALREADY_LIKED: &str = "ALREADY_LIKED";
pub const ALREADY_UNLIKED: &str = "ALREADY_UNLIKED";
pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

// --- validation rule codes (per-field) ---
pub const REQUIRED: &str = "REQUIRED";
pub const TOO_SHORT: &str = "TOO_SHORT";
pub const TOO_LONG: &str = "TOO_LONG";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
