//! Endpoint descriptors supplied by callers.

use crate::http::HttpMethod;

/// Which resource to request, with which method and query.
///
/// `url` is kept as the caller wrote it; it is only parsed when a request is
/// built, so an unparsable string surfaces as `FetchError::BadUrl` from the
/// executor rather than at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub method: HttpMethod,
    pub query_items: Option<Vec<(String, String)>>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            query_items: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Append one query item. Items keep the order they were added in.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_items
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Replace all query items.
    pub fn with_query_items<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query_items = Some(items.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }
}
