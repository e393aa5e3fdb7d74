//! RFC 3986 percent-encoding as required by OAuth 1.0a (RFC 5849 section 3.6).

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{EncodingError, EncodingResult};

/// Everything except the unreserved set `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` byte by byte with uppercase hex digits.
///
/// Multi-byte UTF-8 sequences are encoded one byte at a time, so `"Ā"`
/// becomes `"%C4%80"`.
///
/// # Note
/// Encoding is not idempotent: a `%` in the input is itself encoded, so
/// `percent_encode(percent_encode(s)) == percent_encode(s)` only holds when
/// `s` contains no `%` (and nothing else outside the unreserved set).
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Reverse [`percent_encode`].
///
/// Fails when the decoded bytes do not form valid UTF-8.
pub fn percent_decode(input: &str) -> EncodingResult<String> {
    percent_decode_str(input)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| EncodingError::InvalidUtf8(input.to_string()))
}
