use serde::{Deserialize, Serialize};

use crate::SignatureMethod;

/// Consumer credentials of the registered application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub callback_url: String,
}

impl ClientConfig {
    pub fn new<TKey, TSecret, TCallback>(
        consumer_key: TKey,
        consumer_secret: TSecret,
        callback_url: TCallback,
    ) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
        TCallback: Into<String>,
    {
        ClientConfig {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: callback_url.into(),
        }
    }
}

/// Serializable form of a [`Service`](crate::Service).
///
/// ```
/// let config: oauth1a::ServiceConfig = serde_json::from_str(r#"{
///     "request_url": "https://api.twitter.com/oauth/request_token",
///     "authorize_url": "https://api.twitter.com/oauth/authorize",
///     "access_url": "https://api.twitter.com/oauth/access_token",
///     "client": {
///         "consumer_key": "key",
///         "consumer_secret": "secret",
///         "callback_url": "http://localhost:10000/callback/"
///     }
/// }"#).unwrap();
/// let service = oauth1a::Service::from_config(config);
/// assert_eq!(service.signer().method_name(), "HMAC-SHA1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub request_url: String,
    pub authorize_url: String,
    pub access_url: String,
    pub client: ClientConfig,
    #[serde(default)]
    pub signature_method: SignatureMethod,
}
