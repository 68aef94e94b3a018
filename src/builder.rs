use crate::compat::{String, Vec, format};
use crate::error::{ParseError, ParseErrorKind, Result};
use crate::parser::{self, PathKind, State, UrlRecord};
use crate::unicode::percent_encode::{EncodeSet, percent_encode};
use crate::url::Url;

/// Fluent construction of a modified URL.
///
/// Every setter re-enters the parser in the override state that matches
/// the component, so a built URL is canonical by construction. Setters
/// chain; the first failure is remembered and reported by
/// [`UrlBuilder::finish`]. The source [`Url`] is never touched.
///
/// ```
/// use urlkit::Url;
///
/// let url = Url::parse("http://example.com/a?x=1", None)?;
/// let moved = url
///     .to_builder()
///     .scheme("https")
///     .port("8080")
///     .path("/b/c")
///     .finish()?;
/// assert_eq!(moved.as_str(), "https://example.com:8080/b/c?x=1");
/// # Ok::<_, urlkit::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    record: Result<UrlRecord>,
}

impl Url {
    /// Start building a modified copy of this URL.
    pub fn to_builder(&self) -> UrlBuilder {
        UrlBuilder {
            record: self.to_record(),
        }
    }
}

impl UrlBuilder {
    fn update(self, f: impl FnOnce(UrlRecord) -> Result<UrlRecord>) -> Self {
        Self {
            record: self.record.and_then(f),
        }
    }

    /// Re-enter the state machine at `state` over `input`, mutating the
    /// working record in place.
    fn reparse(self, input: &str, state: State) -> Self {
        self.update(|record| {
            let (record, _errors) =
                parser::parse_into_record(input, None, Some(state), record)?;
            Ok(record)
        })
    }

    fn forbidden(state: State) -> ParseError {
        ParseError::new(ParseErrorKind::InvalidUrl, state, 0)
    }

    /// Replace the scheme. Fails when the change would cross the
    /// special/non-special boundary or give `file:` credentials or a
    /// port.
    pub fn scheme(self, scheme: &str) -> Self {
        self.reparse(&format!("{scheme}:"), State::SchemeStart)
    }

    /// Replace the username, percent-encoding with the userinfo set.
    pub fn username(self, username: &str) -> Self {
        self.update(|mut record| {
            if record.cannot_have_credentials_or_port() {
                return Err(Self::forbidden(State::Authority));
            }
            record.username = percent_encode(username.as_bytes(), EncodeSet::Userinfo);
            Ok(record)
        })
    }

    /// Replace the password, percent-encoding with the userinfo set.
    pub fn password(self, password: &str) -> Self {
        self.update(|mut record| {
            if record.cannot_have_credentials_or_port() {
                return Err(Self::forbidden(State::Authority));
            }
            record.password = percent_encode(password.as_bytes(), EncodeSet::Userinfo);
            Ok(record)
        })
    }

    /// Replace host and, if present in the input, the port.
    pub fn host(self, host: &str) -> Self {
        self.update(|record| {
            if record.has_opaque_path() {
                return Err(Self::forbidden(State::Host));
            }
            Ok(record)
        })
        .reparse(host, State::Host)
    }

    /// Replace the host, leaving any current port alone. Input that
    /// carries its own port is ignored wholesale, the way the hostname
    /// setter behaves in browsers.
    pub fn hostname(self, hostname: &str) -> Self {
        self.update(|record| {
            if record.has_opaque_path() {
                return Err(Self::forbidden(State::Hostname));
            }
            Ok(record)
        })
        .reparse(hostname, State::Hostname)
    }

    /// Replace the port; an empty string clears it.
    pub fn port(self, port: &str) -> Self {
        let clear = port.is_empty();
        let this = self.update(move |mut record| {
            if record.cannot_have_credentials_or_port() {
                return Err(Self::forbidden(State::Port));
            }
            if clear {
                record.port = None;
            }
            Ok(record)
        });
        if clear { this } else { this.reparse(port, State::Port) }
    }

    /// Replace the path. Fails for cannot-be-a-base URLs.
    pub fn path(self, path: &str) -> Self {
        self.update(|mut record| {
            if record.has_opaque_path() {
                return Err(Self::forbidden(State::PathStart));
            }
            record.path = PathKind::Segments(Vec::new());
            Ok(record)
        })
        .reparse(path, State::PathStart)
    }

    /// Replace the query; an empty string clears it. A leading `?` is
    /// ignored.
    pub fn query(self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return self.update(|mut record| {
                record.query = None;
                Ok(record)
            });
        }
        self.update(|mut record| {
            record.query = Some(String::new());
            Ok(record)
        })
        .reparse(query, State::Query)
    }

    /// Replace the fragment; an empty string clears it. A leading `#` is
    /// ignored.
    pub fn fragment(self, fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if fragment.is_empty() {
            return self.update(|mut record| {
                record.fragment = None;
                Ok(record)
            });
        }
        self.update(|mut record| {
            record.fragment = Some(String::new());
            Ok(record)
        })
        .reparse(fragment, State::Fragment)
    }

    /// Serialize the built URL, or report the first setter failure.
    pub fn finish(self) -> Result<Url> {
        Ok(Url::from_record(self.record?, Vec::new()))
    }
}
