//! The `scheme://authority?name=value` envelope around a session blob.
//!
//! Only the handful of URI features a session payload uses are handled:
//! a scheme, an authority, an optional (ignored) path and fragment, and a
//! `&`-separated query whose names and values may be percent-encoded.
//! `+` in a query is a literal plus sign, not a space, matching how the
//! messaging host hands the URL back.

use crate::ProtocolError;

/// A borrowed view of a parsed payload URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PayloadUri<'a> {
    scheme: &'a str,
    authority: &'a str,
    query: Option<&'a str>,
}

impl<'a> PayloadUri<'a> {
    /// Splits `input` into scheme, authority and query.
    ///
    /// # Errors
    /// [`ProtocolError::MalformedUri`] when there is no `://` separator or
    /// the scheme has characters a URI scheme can't contain.
    pub(crate) fn parse(input: &'a str) -> Result<Self, ProtocolError> {
        let (scheme, rest) = input
            .split_once("://")
            .ok_or_else(|| malformed("missing \"://\" separator"))?;

        if !is_valid_scheme(scheme) {
            return Err(malformed(format!("invalid scheme {scheme:?}")));
        }

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (before_query, query) = match rest.split_once('?') {
            Some((before, query)) => (before, Some(query)),
            None => (rest, None),
        };
        let authority = before_query
            .split_once('/')
            .map_or(before_query, |(authority, _)| authority);

        Ok(Self {
            scheme,
            authority,
            query,
        })
    }

    pub(crate) fn scheme(&self) -> &'a str {
        self.scheme
    }

    pub(crate) fn authority(&self) -> &'a str {
        self.authority
    }

    /// The percent-decoded value of the first query item called `name`.
    ///
    /// Returns `Ok(None)` when there's no such item, or when the first one
    /// has no `=value` part.
    ///
    /// # Errors
    /// [`ProtocolError::MalformedUri`] for a broken `%` escape or an escape
    /// that decodes to invalid UTF-8.
    pub(crate) fn query_param(&self, name: &str) -> Result<Option<String>, ProtocolError> {
        let Some(query) = self.query else {
            return Ok(None);
        };

        for item in query.split('&').filter(|item| !item.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (item, None),
            };
            if percent_decode(key)? == name {
                return value.map(percent_decode).transpose();
            }
        }
        Ok(None)
    }
}

/// Builds `scheme://authority?param=value`, percent-encoding the query parts.
pub(crate) fn build(scheme: &str, authority: &str, param: &str, value: &str) -> String {
    format!(
        "{scheme}://{authority}?{}={}",
        percent_encode(param),
        percent_encode(value)
    )
}

fn malformed(reason: impl Into<String>) -> ProtocolError {
    ProtocolError::MalformedUri(reason.into())
}

/// RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn percent_decode(input: &str) -> Result<String, ProtocolError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = bytes
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| malformed(format!("bad percent escape at byte {i}")))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| malformed("percent escape is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_scheme_authority_and_query() {
        let uri = PayloadUri::parse("ggtime://session?data=abc").unwrap();
        assert_eq!(uri.scheme(), "ggtime");
        assert_eq!(uri.authority(), "session");
        assert_eq!(uri.query_param("data").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_ignores_path_and_fragment() {
        let uri = PayloadUri::parse("ggtime://session/extra?data=abc#top").unwrap();
        assert_eq!(uri.authority(), "session");
        assert_eq!(uri.query_param("data").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_without_separator_returns_malformed() {
        let result = PayloadUri::parse("not a url");
        assert!(matches!(result, Err(ProtocolError::MalformedUri(_))));
    }

    #[test]
    fn test_parse_bad_scheme_returns_malformed() {
        assert!(PayloadUri::parse("://session?data=x").is_err());
        assert!(PayloadUri::parse("1gg://session?data=x").is_err());
        assert!(PayloadUri::parse("gg time://session?data=x").is_err());
    }

    #[test]
    fn test_query_param_missing_returns_none() {
        let no_query = PayloadUri::parse("ggtime://session").unwrap();
        assert_eq!(no_query.query_param("data").unwrap(), None);

        let other = PayloadUri::parse("ggtime://session?foo=bar").unwrap();
        assert_eq!(other.query_param("data").unwrap(), None);
    }

    #[test]
    fn test_query_param_first_match_wins() {
        let uri = PayloadUri::parse("ggtime://session?x=1&data=first&data=second").unwrap();
        assert_eq!(uri.query_param("data").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_query_param_without_value_returns_none() {
        let uri = PayloadUri::parse("ggtime://session?data&data=later").unwrap();
        assert_eq!(uri.query_param("data").unwrap(), None);
    }

    #[test]
    fn test_query_param_percent_decodes_and_keeps_plus() {
        let uri = PayloadUri::parse("ggtime://session?data=a%2Bb%3D+c").unwrap();
        assert_eq!(uri.query_param("data").unwrap().as_deref(), Some("a+b=+c"));
    }

    #[test]
    fn test_query_param_bad_escape_returns_malformed() {
        let uri = PayloadUri::parse("ggtime://session?data=%zz").unwrap();
        assert!(matches!(uri.query_param("data"), Err(ProtocolError::MalformedUri(_))));

        let truncated = PayloadUri::parse("ggtime://session?data=abc%4").unwrap();
        assert!(truncated.query_param("data").is_err());

        let signed = PayloadUri::parse("ggtime://session?data=%+4").unwrap();
        assert!(matches!(signed.query_param("data"), Err(ProtocolError::MalformedUri(_))));
    }

    #[test]
    fn test_build_percent_encodes_reserved_characters() {
        let uri = build("ggtime", "session", "data", "a+b/c=");
        assert_eq!(uri, "ggtime://session?data=a%2Bb%2Fc%3D");

        let parsed = PayloadUri::parse(&uri).unwrap();
        assert_eq!(parsed.query_param("data").unwrap().as_deref(), Some("a+b/c="));
    }

    #[test]
    fn test_build_leaves_url_safe_base64_untouched() {
        let uri = build("ggtime", "session", "data", "eyJpZCI6-_x");
        assert_eq!(uri, "ggtime://session?data=eyJpZCI6-_x");
    }
}
