use crate::compat::{Cow, String, ToString, Vec, format};
use crate::error::{ParseError, Result};
use crate::parser::{self, State, UrlRecord, special_scheme_port};
use crate::unicode::percent_encode::percent_decode;
use crate::url_components::UrlComponents;
use crate::validation::ValidationError;

/// A parsed, immutable URL.
///
/// The canonical serialization is the single backing string; every
/// component accessor returns a slice of it located through an
/// offset/length span, so getters are zero-copy and clones need no range
/// fixups. Mutation goes through [`UrlBuilder`](crate::UrlBuilder), which
/// produces new `Url` values.
#[derive(Debug, Clone)]
pub struct Url {
    serialization: String,
    components: UrlComponents,
    validation_errors: Vec<ValidationError>,
}

impl Url {
    /// Parse a URL from a string, optionally against a base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for the fatal conditions of the WHATWG
    /// standard: a relative reference without a usable base, an
    /// unparseable host, an out-of-range port, and so on. Everything
    /// milder lands in [`Url::validation_errors`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlkit::Url;
    ///
    /// let url = Url::parse("https://example.com/a?q=1#top", None)?;
    /// assert_eq!(url.scheme(), "https");
    /// assert_eq!(url.host(), "example.com");
    /// assert_eq!(url.path(), "/a");
    ///
    /// let base = Url::parse("http://example.com/dir/page", None)?;
    /// let url = Url::parse("sibling", Some(&base))?;
    /// assert_eq!(url.as_str(), "http://example.com/dir/sibling");
    /// # Ok::<_, urlkit::ParseError>(())
    /// ```
    pub fn parse(input: &str, base: Option<&Url>) -> Result<Url> {
        let base_record = base.map(Url::to_record).transpose()?;
        let (record, errors) = parser::parse_url(input, base_record.as_ref())?;
        Ok(Url::from_record(record, errors))
    }

    /// Check whether an input would parse, discarding the result.
    pub fn can_parse(input: &str, base: Option<&Url>) -> bool {
        Url::parse(input, base).is_ok()
    }

    pub(crate) fn from_record(record: UrlRecord, errors: Vec<ValidationError>) -> Url {
        let (serialization, components) = record.serialize();
        Url {
            serialization,
            components,
            validation_errors: errors,
        }
    }

    pub(crate) fn to_record(&self) -> Result<UrlRecord> {
        UrlRecord::from_url(self)
            .map_err(|kind| ParseError::new(kind, State::SchemeStart, 0))
    }

    fn slice(&self, span: Option<crate::url_components::Span>) -> &str {
        span.map_or("", |span| &self.serialization[span.range()])
    }

    // ---- component accessors ----------------------------------------

    /// The canonical serialization.
    pub fn as_str(&self) -> &str {
        &self.serialization
    }

    /// Consume the URL, returning the backing string.
    pub fn into_string(self) -> String {
        self.serialization
    }

    /// The lowercase scheme, without the trailing `:`.
    pub fn scheme(&self) -> &str {
        self.slice(self.components.scheme)
    }

    /// The username, `""` when absent.
    pub fn username(&self) -> &str {
        self.slice(self.components.username)
    }

    /// The password, `""` when absent.
    pub fn password(&self) -> &str {
        self.slice(self.components.password)
    }

    pub fn has_credentials(&self) -> bool {
        self.components.username.is_some() || self.components.password.is_some()
    }

    /// The serialized host (brackets included for IPv6), `""` when absent.
    pub fn host(&self) -> &str {
        self.slice(self.components.host)
    }

    pub fn has_host(&self) -> bool {
        self.components.host.is_some()
    }

    /// Present-but-empty host, as in `file:///p` and some non-special
    /// schemes.
    pub fn has_empty_host(&self) -> bool {
        self.components.host.is_some_and(|span| span.is_empty())
    }

    /// The port, `None` when absent or equal to the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.components.port_number
    }

    /// The port digits, `""` when no explicit port is serialized.
    pub fn port_str(&self) -> &str {
        self.slice(self.components.port)
    }

    /// The serialized path: `/`-joined segments, or the opaque string of
    /// a cannot-be-a-base URL.
    pub fn path(&self) -> &str {
        self.slice(self.components.path)
    }

    /// Path segments without their leading `/`, `None` for opaque paths.
    pub fn path_segments(&self) -> Option<core::str::Split<'_, char>> {
        if self.cannot_be_a_base() {
            return None;
        }
        let path = self.path();
        Some(path.strip_prefix('/').unwrap_or(path).split('/'))
    }

    /// The query, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.components.query.map(|span| &self.serialization[span.range()])
    }

    /// The fragment, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.components
            .fragment
            .map(|span| &self.serialization[span.range()])
    }

    pub fn cannot_be_a_base(&self) -> bool {
        self.components.cannot_be_a_base
    }

    /// Iterate the query as decoded name/value pairs.
    ///
    /// Both `&` and `;` delimit pairs; a pair without `=` has an empty
    /// value; `+` decodes to a space.
    pub fn query_pairs(&self) -> QueryPairs<'_> {
        QueryPairs {
            remaining: self.query().unwrap_or(""),
        }
    }

    /// The origin: `scheme://host[:port]` for special schemes, the inner
    /// URL's origin for `blob:`, `"null"` otherwise (`file:` included).
    pub fn origin(&self) -> String {
        if self.scheme() == "blob" {
            if let Ok(inner) = Url::parse(self.path(), None)
                && matches!(inner.scheme(), "http" | "https")
            {
                return inner.origin();
            }
            return "null".to_string();
        }

        // Only the special schemes with a default port form tuple origins.
        let Some(Some(_)) = special_scheme_port(self.scheme()) else {
            return "null".to_string();
        };

        let mut origin = format!("{}://{}", self.scheme(), self.host());
        if let Some(port) = self.components.port {
            origin.push(':');
            origin.push_str(&self.serialization[port.range()]);
        }
        origin
    }

    /// The ordered non-fatal diagnostics emitted while this URL was
    /// parsed. Empty for URLs produced by the builder or the
    /// normalizer.
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }
}

impl core::fmt::Display for Url {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialization)
    }
}

impl core::str::FromStr for Url {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s, None)
    }
}

// Equality, ordering, and hashing all follow the canonical serialization;
// the validation-error log is diagnostic payload, not identity.
impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.serialization == other.serialization
    }
}

impl Eq for Url {}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.serialization.cmp(&other.serialization)
    }
}

impl core::hash::Hash for Url {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.serialization.hash(state);
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.serialization
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        use serde::de::Error;
        let s = <Cow<'de, str>>::deserialize(deserializer)?;
        Url::parse(&s, None).map_err(D::Error::custom)
    }
}

/// Iterator over decoded `(name, value)` query pairs.
///
/// Borrows the URL's serialization; values decode lazily and only
/// allocate when a pair actually contains `%` escapes or `+`.
#[derive(Debug, Clone)]
pub struct QueryPairs<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for QueryPairs<'a> {
    type Item = (Cow<'a, str>, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining.is_empty() {
                return None;
            }

            let pair = match self.remaining.find(['&', ';']) {
                Some(at) => {
                    let pair = &self.remaining[..at];
                    self.remaining = &self.remaining[at + 1..];
                    pair
                }
                None => {
                    let pair = self.remaining;
                    self.remaining = "";
                    pair
                }
            };

            if pair.is_empty() {
                continue;
            }

            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, value),
                None => (pair, ""),
            };
            return Some((decode_query_component(name), decode_query_component(value)));
        }
    }
}

fn decode_query_component(input: &str) -> Cow<'_, str> {
    if !input.contains(['%', '+']) {
        return Cow::Borrowed(input);
    }

    let replaced = input.replace('+', " ");
    let decoded = percent_decode(replaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_separators() {
        let url = Url::parse("http://h/?a=1&b=2;c=3", None).unwrap();
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(
            pairs,
            [
                (Cow::Borrowed("a"), Cow::Borrowed("1")),
                (Cow::Borrowed("b"), Cow::Borrowed("2")),
                (Cow::Borrowed("c"), Cow::Borrowed("3")),
            ]
        );
    }

    #[test]
    fn test_query_pairs_decoding() {
        let url = Url::parse("http://h/?name=J%C3%BCrgen&msg=a+b&flag", None).unwrap();
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].1, "Jürgen");
        assert_eq!(pairs[1].1, "a b");
        assert_eq!(pairs[2], (Cow::Borrowed("flag"), Cow::Borrowed("")));
    }

    #[test]
    fn test_query_pairs_empty() {
        let url = Url::parse("http://h/p", None).unwrap();
        assert_eq!(url.query_pairs().count(), 0);

        let url = Url::parse("http://h/p?", None).unwrap();
        assert_eq!(url.query_pairs().count(), 0);
    }

    #[test]
    fn test_comparisons_follow_serialization() {
        let a = Url::parse("http://example.com/a", None).unwrap();
        let b = Url::parse(" http://example.com/a ", None).unwrap();
        // Same serialization, different validation logs: still equal.
        assert_eq!(a, b);
        assert_ne!(a.validation_errors(), b.validation_errors());

        let c = Url::parse("http://example.com/b", None).unwrap();
        assert!(a < c);
    }
}
