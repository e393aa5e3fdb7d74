use http::header::CONTENT_TYPE;
use http::HeaderMap;
use url::Url;

use crate::encoding::percent_encode;
use crate::OAUTH_SIGNATURE_KEY;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Every parameter that takes part in the signature, already percent-encoded.
///
/// Collects the OAuth protocol parameters together with the query string and
/// form-encoded body of the request. `oauth_signature` is never admitted.
#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    pairs: Vec<(String, String)>,
}

impl ParameterList {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a single raw (not yet encoded) parameter.
    pub fn push(&mut self, key: &str, value: &str) {
        if key == OAUTH_SIGNATURE_KEY {
            return;
        }
        self.pairs.push((percent_encode(key), percent_encode(value)));
    }

    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            self.push(key.as_ref(), value.as_ref());
        }
    }

    /// Add the decoded query string parameters of `url`.
    pub fn extend_query(&mut self, url: &Url) {
        self.extend(url.query_pairs());
    }

    /// Add the body parameters when the request is form-encoded.
    pub fn extend_form(&mut self, headers: &HeaderMap, body: &[u8]) {
        if is_form_urlencoded(headers) {
            self.extend(url::form_urlencoded::parse(body));
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sorted by encoded key, then by encoded value, joined as `k=v&k=v`.
    pub fn to_canonical_string(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.pairs.iter().collect();
        sorted.sort();
        sorted
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}
