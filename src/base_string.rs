//! Signature base string construction (RFC 5849 section 3.4.1).

use http::Method;
use url::Url;

use crate::encoding::percent_encode;
use crate::parameters::ParameterList;

/// `scheme://host[:port]/path`, without query or fragment.
///
/// Scheme and host are lowercased by the URL parser, and the port is only
/// kept when it differs from the scheme's default.
pub fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

/// `METHOD&encoded(base url)&encoded(canonical parameters)`
pub fn signature_base_string(method: &Method, url: &Url, params: &ParameterList) -> String {
    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(&base_url(url)),
        percent_encode(&params.to_canonical_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_strips_query_fragment_and_default_port() {
        for (input, expected) in &[
            (
                "https://example.com/endpoint?x=1#frag",
                "https://example.com/endpoint",
            ),
            ("HTTP://Example.COM:80/r%20v/X?id=123", "http://example.com/r%20v/X"),
            ("https://www.example.net:8080/?q=1", "https://www.example.net:8080/"),
            ("https://example.com:443", "https://example.com/"),
        ] {
            let url = Url::parse(input).unwrap();
            assert_eq!(&base_url(&url), expected);
        }
    }

    #[test]
    fn three_parts_joined() {
        let url = Url::parse("https://example.com/endpoint").unwrap();
        let mut params = ParameterList::new();
        params.extend(vec![
            ("oauth_version", "1.0"),
            ("oauth_consumer_key", "consumer_key"),
        ]);

        let base = signature_base_string(&Method::GET, &url, &params);
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fexample.com%2Fendpoint\
             &oauth_consumer_key%3Dconsumer_key%26oauth_version%3D1.0"
        );
    }

    #[test]
    fn method_uppercased() {
        let url = Url::parse("https://example.com/").unwrap();
        let method = Method::from_bytes(b"patch").unwrap();
        let base = signature_base_string(&method, &url, &ParameterList::new());
        assert!(base.starts_with("PATCH&"));
        assert!(base.ends_with('&'));
    }
}
