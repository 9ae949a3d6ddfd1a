//! Ordered query parameters with flag-style keys.
//!
//! The gateway uses bare query keys as flags (`?events`, `?ack`,
//! `?notification`), so a parameter value is optional: `None` renders as the
//! key alone, `Some(v)` as `key=v`. Insertion order is preserved.

/// An ordered sequence of `(key, optional value)` query parameters.
///
/// # Examples
///
/// ```
/// use pubsub_client::QueryParams;
///
/// let params = QueryParams::new().flag("events").with("max-entries", 10);
/// assert_eq!(params.to_query_string(), "?events&max-entries=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), Some(value.to_string())));
        self
    }

    /// Append a bare `key`.
    #[must_use]
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.pairs.push((key.into(), None));
        self
    }

    /// Append `key=value` when `value` is present, nothing otherwise.
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Value of the first parameter named `key`.
    ///
    /// `Some(None)` means the key is present as a bare flag.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Whether a parameter named `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Form-urlencode the parameters, without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                let key: String = form_urlencoded::byte_serialize(k.as_bytes()).collect();
                match v {
                    Some(v) => {
                        let value: String = form_urlencoded::byte_serialize(v.as_bytes()).collect();
                        format!("{key}={value}")
                    }
                    None => key,
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// The encoded parameters with a leading `?`, or empty when there are none.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self.encode())
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Build the query part of a request path.
///
/// `extra` is a pre-encoded fragment (endpoint arguments, literal ARNs) that is
/// appended verbatim after the encoded parameters.
#[must_use]
pub fn build_query(params: Option<&QueryParams>, extra: Option<&str>) -> String {
    let mut query = params.map(QueryParams::to_query_string).unwrap_or_default();
    if let Some(extra) = extra.filter(|e| !e.is_empty()) {
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str(extra);
    }
    query
}
