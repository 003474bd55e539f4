//! Encoded query payloads.

use crate::error::TicsError;

/// An ordered, percent-safe query payload.
///
/// Field payloads hold `(key, encoded value)` pairs in insertion order. Raw payloads carry an
/// opaque query (a session token, a caller supplied query) that is sent untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedPayload {
    fields: Vec<(String, String)>,
    raw: Option<String>,
}

impl EncodedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload consisting of a single session token.
    pub fn token(token: &str) -> Self {
        Self {
            fields: Vec::new(),
            raw: Some(urlencoding::encode(token).into_owned()),
        }
    }

    /// Caller supplied query, forwarded as-is minus a leading `?`.
    pub fn opaque(query: &str) -> Self {
        Self {
            fields: Vec::new(),
            raw: Some(query.strip_prefix('?').unwrap_or(query).to_string()),
        }
    }

    /// Append a field, percent-encoding the value.
    pub fn push(&mut self, key: &str, value: impl AsRef<str>) {
        self.fields
            .push((key.to_string(), urlencoding::encode(value.as_ref()).into_owned()));
    }

    pub fn with(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.push(key, value);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Encoded value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Percent-decoded value of the first field named `key`.
    pub fn decoded(&self, key: &str) -> Result<Option<String>, TicsError> {
        match self.get(key) {
            Some(value) => urlencoding::decode(value)
                .map(|v| Some(v.into_owned()))
                .map_err(|e| TicsError::MalformedPayload(format!("field '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw.as_deref().map_or(true, str::is_empty)
    }

    /// Render as `k=v&k=v` without a leading `?`.
    pub fn to_query(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Split a query string back into fields. Values stay percent-encoded.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let fields = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (part.to_string(), String::new()),
            })
            .collect();
        Self { fields, raw: None }
    }
}
