use http::header::HeaderName;
use http::HeaderMap;

/// Request header carrying a caller-chosen `oauth_nonce`.
pub const NONCE_OVERRIDE_HEADER: &str = "x-oauth-nonce";
/// Request header carrying a caller-chosen `oauth_timestamp`.
pub const TIMESTAMP_OVERRIDE_HEADER: &str = "x-oauth-timestamp";

/// Fixed nonce and/or timestamp to sign with instead of fresh values.
///
/// This exists to make signatures reproducible in tests and while debugging a
/// provider integration. Production code leaves both unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningOverrides {
    nonce: Option<String>,
    timestamp: Option<String>,
}

impl SigningOverrides {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<String>,
    {
        SigningOverrides {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: ToString,
    {
        SigningOverrides {
            timestamp: Some(timestamp.to_string()),
            ..self
        }
    }

    /// Remove the override headers from `headers` and keep their values.
    ///
    /// The headers are removed even when they do not hold valid text, so they
    /// never reach the provider.
    pub fn take_from_headers(headers: &mut HeaderMap) -> Self {
        SigningOverrides {
            nonce: take_header(headers, NONCE_OVERRIDE_HEADER),
            timestamp: take_header(headers, TIMESTAMP_OVERRIDE_HEADER),
        }
    }

    /// Values from `self` win over the ones in `fallback`.
    pub fn or(self, fallback: SigningOverrides) -> Self {
        SigningOverrides {
            nonce: self.nonce.or(fallback.nonce),
            timestamp: self.timestamp.or(fallback.timestamp),
        }
    }

    pub(crate) fn nonce_or_generate(&self) -> String {
        self.nonce.clone().unwrap_or_else(generate_nonce)
    }

    pub(crate) fn timestamp_or_now(&self) -> String {
        self.timestamp.clone().unwrap_or_else(generate_timestamp)
    }
}

fn take_header(headers: &mut HeaderMap, name: &'static str) -> Option<String> {
    let name = HeaderName::from_static(name);
    let value = headers.get(&name)?.to_str().ok().map(str::to_string);
    headers.remove(&name);
    value.filter(|v| !v.is_empty())
}

/// 32 hex characters from the thread-local CSPRNG.
fn generate_nonce() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

fn generate_timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}
