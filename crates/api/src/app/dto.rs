use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub text: Option<String>,
}

/// Raw query parameters for the list endpoint.
///
/// `limit` stays a string: parsing and its silent fallback are domain rules,
/// and a typed extractor would reject non-numeric input with a 400 instead.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
}
