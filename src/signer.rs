use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

use crate::encoding::percent_encode;

/// Capability of producing an OAuth signature over a signature base string.
///
/// The method name is part of the signed parameter set, so every variant
/// reports the value it publishes as `oauth_signature_method`.
pub trait Signer: fmt::Debug + Send + Sync {
    /// Value of `oauth_signature_method`.
    fn method_name(&self) -> &'static str;

    /// Compute the published (already textual) signature.
    fn sign(&self, base_string: &str, consumer_secret: &str, token_secret: Option<&str>) -> String;
}

/// `encode(consumer_secret)&encode(token_secret)`, the token part empty when absent.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    )
}

/// The `HMAC-SHA1` signature method (RFC 5849 section 3.4.2).
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha1Signer;

impl Signer for HmacSha1Signer {
    fn method_name(&self) -> &'static str {
        "HMAC-SHA1"
    }

    fn sign(&self, base_string: &str, consumer_secret: &str, token_secret: Option<&str>) -> String {
        let key = signing_key(consumer_secret, token_secret);
        let mut mac = <Hmac<Sha1> as Mac>::new_from_slice(key.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(base_string.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }
}

/// The `PLAINTEXT` signature method (RFC 5849 section 3.4.4).
///
/// Only meaningful over TLS, the signing key is sent as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextSigner;

impl Signer for PlaintextSigner {
    fn method_name(&self) -> &'static str {
        "PLAINTEXT"
    }

    fn sign(&self, _base_string: &str, consumer_secret: &str, token_secret: Option<&str>) -> String {
        signing_key(consumer_secret, token_secret)
    }
}

/// Configurable selection of a [`Signer`] variant, named by its protocol name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignatureMethod {
    #[default]
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    #[serde(rename = "PLAINTEXT")]
    Plaintext,
}

impl SignatureMethod {
    pub fn signer(self) -> Box<dyn Signer> {
        match self {
            SignatureMethod::HmacSha1 => Box::new(HmacSha1Signer),
            SignatureMethod::Plaintext => Box::new(PlaintextSigner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_key_encodes_both_secrets() {
        assert_eq!(signing_key("consumer_secret", None), "consumer_secret&");
        assert_eq!(signing_key("a&b", Some("c d")), "a%26b&c%20d");
    }

    #[test]
    fn hmac_sha1_golden() {
        let base = "GET&https%3A%2F%2Fexample.com%2Fendpoint\
                    &oauth_consumer_key%3Dconsumer_key%26oauth_nonce%3Dnonce\
                    %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3Dtimestamp\
                    %26oauth_token%3Dtoken%26oauth_version%3D1.0";
        let signature = HmacSha1Signer.sign(base, "consumer_secret", Some("secret"));
        assert_eq!(signature, "8+ZC6DP8FU3z50qSWDeYCGix2x0=");
    }

    #[test]
    fn hmac_sha1_without_token_secret() {
        let base = "POST&https%3A%2F%2Fexample.com%2Frequest_token\
                    &oauth_callback%3Dhttps%253A%252F%252Fexample.com%252Fcallback\
                    %26oauth_consumer_key%3Dconsumer_key%26oauth_nonce%3Dnonce\
                    %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3Dtimestamp\
                    %26oauth_version%3D1.0";
        let signature = HmacSha1Signer.sign(base, "consumer_secret", None);
        assert_eq!(signature, "OQBIVhyuwujR9Msf7FwrdqkmX20=");
    }

    #[test]
    fn plaintext_is_signing_key() {
        assert_eq!(
            PlaintextSigner.sign("ignored", "consumer_secret", Some("secret")),
            "consumer_secret&secret"
        );
    }

    #[test]
    fn method_names() {
        assert_eq!(SignatureMethod::HmacSha1.signer().method_name(), "HMAC-SHA1");
        assert_eq!(SignatureMethod::Plaintext.signer().method_name(), "PLAINTEXT");
        assert_eq!(SignatureMethod::default(), SignatureMethod::HmacSha1);
    }
}
