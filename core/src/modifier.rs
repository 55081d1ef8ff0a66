//! Request modifiers applied just before a request is sent.

use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::transport::PreparedRequest;

/// Media type set by `default_modifier`.
pub const APPLICATION_JSON: &str = "application/json";

/// Edits a request in place. Modifiers run in list order, so a later one can
/// overwrite headers an earlier one set.
pub type Modifier = Box<dyn Fn(&mut PreparedRequest)>;

/// `default_modifier` as a plain function pointer.
pub const DEFAULT_MODIFIER: fn(&mut PreparedRequest) = default_modifier;

/// Mark the request body and the accepted response as JSON, replacing any
/// existing `Content-Type` and `Accept` values.
pub fn default_modifier(request: &mut PreparedRequest) {
    let headers = request.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
}
