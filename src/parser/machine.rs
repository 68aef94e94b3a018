use core::mem::take;

use crate::compat::{String, Vec};
use crate::error::{ParseError, ParseErrorKind};
use crate::host::Host;
use crate::parser::record::{
    PathKind, UrlRecord, is_normalized_windows_drive_letter, is_windows_drive_letter,
    special_scheme_port, starts_with_windows_drive_letter,
};
use crate::parser::state::State;
use crate::unicode::percent_encode::{EncodeSet, encode_byte, push_encoded_byte};
use crate::validation::ValidationError;

/// What to do with the input cursor after a state handler ran.
///
/// `Stay` is the reconsume operation: the same byte is examined again
/// under the state the handler just switched to.
enum Step {
    Advance,
    Stay,
    Done,
}

/// The byte-driven URL parser.
///
/// One instance consumes one (pre-stripped) input. The machine keeps the
/// working buffer and component record local and commits nothing until the
/// caller serializes the returned record.
pub struct Machine<'a> {
    input: &'a [u8],
    pointer: usize,
    state: State,
    buffer: Vec<u8>,
    url: UrlRecord,
    base: Option<&'a UrlRecord>,
    state_override: Option<State>,
    at_sign_seen: bool,
    inside_brackets: bool,
    password_token_seen: bool,
    errors: Vec<ValidationError>,
}

impl<'a> Machine<'a> {
    pub fn new(
        input: &'a [u8],
        base: Option<&'a UrlRecord>,
        state_override: Option<State>,
        url: UrlRecord,
        errors: Vec<ValidationError>,
    ) -> Self {
        Self {
            input,
            pointer: 0,
            state: state_override.unwrap_or(State::SchemeStart),
            buffer: Vec::new(),
            url,
            base,
            state_override,
            at_sign_seen: false,
            inside_brackets: false,
            password_token_seen: false,
            errors,
        }
    }

    pub fn run(mut self) -> Result<(UrlRecord, Vec<ValidationError>), ParseError> {
        loop {
            let byte = self.input.get(self.pointer).copied();
            match self.step(byte)? {
                Step::Advance => {
                    if self.pointer >= self.input.len() {
                        break;
                    }
                    self.pointer += 1;
                }
                Step::Stay => {}
                Step::Done => break,
            }
        }
        Ok((self.url, self.errors))
    }

    fn step(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match self.state {
            State::SchemeStart => self.on_scheme_start(byte),
            State::Scheme => self.on_scheme(byte),
            State::NoScheme => self.on_no_scheme(byte),
            State::SpecialRelativeOrAuthority => self.on_special_relative_or_authority(byte),
            State::PathOrAuthority => self.on_path_or_authority(byte),
            State::Relative => self.on_relative(byte),
            State::RelativeSlash => self.on_relative_slash(byte),
            State::SpecialAuthoritySlashes => self.on_special_authority_slashes(byte),
            State::SpecialAuthorityIgnoreSlashes => {
                self.on_special_authority_ignore_slashes(byte)
            }
            State::Authority => self.on_authority(byte),
            State::Host | State::Hostname => self.on_host(byte),
            State::Port => self.on_port(byte),
            State::File => self.on_file(byte),
            State::FileSlash => self.on_file_slash(byte),
            State::FileHost => self.on_file_host(byte),
            State::PathStart => self.on_path_start(byte),
            State::Path => self.on_path(byte),
            State::OpaquePath => self.on_opaque_path(byte),
            State::Query => self.on_query(byte),
            State::Fragment => self.on_fragment(byte),
        }
    }

    // ---- helpers ----------------------------------------------------

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.state, self.pointer)
    }

    fn verr(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Input after the current byte.
    fn remaining(&self) -> &'a [u8] {
        let from = (self.pointer + 1).min(self.input.len());
        &self.input[from..]
    }

    /// Input from the current byte onward.
    fn remaining_with_current(&self) -> &'a [u8] {
        let from = self.pointer.min(self.input.len());
        &self.input[from..]
    }

    fn hex_pair_follows(&self) -> bool {
        let rest = self.remaining();
        rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
    }

    /// A valid `%HH` triple at the cursor, hex uppercased, or `None`.
    fn uppercased_triple(&self, byte: u8) -> Option<[u8; 3]> {
        if byte != b'%' || !self.hex_pair_follows() {
            return None;
        }
        let rest = self.remaining();
        Some([
            b'%',
            rest[0].to_ascii_uppercase(),
            rest[1].to_ascii_uppercase(),
        ])
    }

    /// Non-fatal diagnostics for bytes that deviate from the URL grammar.
    fn check_url_unit(&mut self, byte: u8) {
        if byte == b'%' {
            if !self.hex_pair_follows() {
                self.verr(ValidationError::InvalidPercentEncoding);
            }
        } else if byte.is_ascii() && !is_url_code_point(byte) {
            self.verr(ValidationError::InvalidUrlUnit);
        }
    }

    fn take_buffer_string(&mut self) -> Result<String, ParseError> {
        String::from_utf8(take(&mut self.buffer))
            .map_err(|_| self.fail(ParseErrorKind::InvalidHost))
    }

    fn is_authority_terminator(&self, byte: Option<u8>) -> bool {
        match byte {
            None | Some(b'/') | Some(b'?') | Some(b'#') => true,
            Some(b'\\') => self.url.is_special(),
            _ => false,
        }
    }

    fn base_or_fail(&self) -> Result<&'a UrlRecord, ParseError> {
        self.base
            .ok_or_else(|| self.fail(ParseErrorKind::RelativeUrlWithoutBase))
    }

    // ---- states -----------------------------------------------------

    fn on_scheme_start(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b) if b.is_ascii_alphabetic() => {
                self.buffer.push(b.to_ascii_lowercase());
                self.state = State::Scheme;
                Ok(Step::Advance)
            }
            _ if self.state_override.is_none() => {
                self.state = State::NoScheme;
                Ok(Step::Stay)
            }
            _ => Err(self.fail(ParseErrorKind::InvalidScheme)),
        }
    }

    fn on_scheme(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') => {
                self.buffer.push(b.to_ascii_lowercase());
                Ok(Step::Advance)
            }
            Some(b':') => {
                let scheme = self.take_buffer_string()?;

                if self.state_override.is_some() {
                    // Schemes may only change within their specialness
                    // class, and "file" never gains credentials or a port.
                    if special_scheme_port(&scheme).is_some() != self.url.is_special()
                        || (scheme == "file"
                            && (self.url.includes_credentials() || self.url.port.is_some()))
                        || (self.url.scheme == "file" && self.url.has_empty_host())
                    {
                        return Err(self.fail(ParseErrorKind::InvalidScheme));
                    }
                    self.url.scheme = scheme;
                    if self.url.port == self.url.default_port() {
                        self.url.port = None;
                    }
                    return Ok(Step::Done);
                }

                self.url.scheme = scheme;

                if self.url.scheme == "file" {
                    if !self.remaining().starts_with(b"//") {
                        self.verr(ValidationError::SpecialSchemeMissingFollowingSolidus);
                    }
                    self.state = State::File;
                } else if self.url.is_special()
                    && self
                        .base
                        .is_some_and(|base| base.scheme == self.url.scheme)
                {
                    self.state = State::SpecialRelativeOrAuthority;
                } else if self.url.is_special() {
                    self.state = State::SpecialAuthoritySlashes;
                } else if self.remaining().first() == Some(&b'/') {
                    self.state = State::PathOrAuthority;
                    self.pointer += 1;
                } else {
                    self.url.path = PathKind::Opaque(String::new());
                    self.state = State::OpaquePath;
                }
                Ok(Step::Advance)
            }
            _ if self.state_override.is_none() => {
                // Not a scheme after all; start over as a relative
                // reference.
                self.buffer.clear();
                self.state = State::NoScheme;
                self.pointer = 0;
                Ok(Step::Stay)
            }
            _ => Err(self.fail(ParseErrorKind::InvalidScheme)),
        }
    }

    fn on_no_scheme(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        let base = self.base_or_fail()?;

        if base.has_opaque_path() {
            if byte != Some(b'#') {
                return Err(self.fail(ParseErrorKind::RelativeUrlWithoutBase));
            }
            self.url.scheme = base.scheme.clone();
            self.url.path = base.path.clone();
            self.url.query = base.query.clone();
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
            return Ok(Step::Advance);
        }

        self.state = if base.scheme == "file" {
            State::File
        } else {
            State::Relative
        };
        Ok(Step::Stay)
    }

    fn on_special_relative_or_authority(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        if byte == Some(b'/') && self.remaining().first() == Some(&b'/') {
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.pointer += 1;
            Ok(Step::Advance)
        } else {
            self.verr(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.state = State::Relative;
            Ok(Step::Stay)
        }
    }

    fn on_path_or_authority(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        if byte == Some(b'/') {
            self.state = State::Authority;
            Ok(Step::Advance)
        } else {
            self.state = State::Path;
            Ok(Step::Stay)
        }
    }

    fn on_relative(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        let base = self.base_or_fail()?;
        self.url.scheme = base.scheme.clone();

        match byte {
            Some(b'/') => {
                self.state = State::RelativeSlash;
                Ok(Step::Advance)
            }
            Some(b'\\') if self.url.is_special() => {
                self.verr(ValidationError::InvalidReverseSolidus);
                self.state = State::RelativeSlash;
                Ok(Step::Advance)
            }
            _ => {
                self.url.username = base.username.clone();
                self.url.password = base.password.clone();
                self.url.host = base.host.clone();
                self.url.port = base.port;
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();

                match byte {
                    Some(b'?') => {
                        self.url.query = Some(String::new());
                        self.state = State::Query;
                        Ok(Step::Advance)
                    }
                    Some(b'#') => {
                        self.url.fragment = Some(String::new());
                        self.state = State::Fragment;
                        Ok(Step::Advance)
                    }
                    None => Ok(Step::Done),
                    Some(_) => {
                        self.url.query = None;
                        self.url.shorten_path();
                        self.state = State::Path;
                        Ok(Step::Stay)
                    }
                }
            }
        }
    }

    fn on_relative_slash(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b @ (b'/' | b'\\')) if self.url.is_special() => {
                if b == b'\\' {
                    self.verr(ValidationError::InvalidReverseSolidus);
                }
                self.state = State::SpecialAuthorityIgnoreSlashes;
                Ok(Step::Advance)
            }
            Some(b'/') => {
                self.state = State::Authority;
                Ok(Step::Advance)
            }
            _ => {
                let base = self.base_or_fail()?;
                self.url.username = base.username.clone();
                self.url.password = base.password.clone();
                self.url.host = base.host.clone();
                self.url.port = base.port;
                self.state = State::Path;
                Ok(Step::Stay)
            }
        }
    }

    fn on_special_authority_slashes(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        if byte == Some(b'/') && self.remaining().first() == Some(&b'/') {
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.pointer += 1;
            Ok(Step::Advance)
        } else {
            self.verr(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.state = State::SpecialAuthorityIgnoreSlashes;
            Ok(Step::Stay)
        }
    }

    fn on_special_authority_ignore_slashes(
        &mut self,
        byte: Option<u8>,
    ) -> Result<Step, ParseError> {
        if matches!(byte, Some(b'/') | Some(b'\\')) {
            self.verr(ValidationError::SpecialSchemeMissingFollowingSolidus);
            Ok(Step::Advance)
        } else {
            self.state = State::Authority;
            Ok(Step::Stay)
        }
    }

    fn on_authority(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b'@') => {
                self.verr(ValidationError::InvalidCredentials);
                let mut credentials = take(&mut self.buffer);
                if self.at_sign_seen {
                    // Everything before this '@' belonged to the userinfo
                    // after all; the earlier '@' is re-encoded.
                    let mut prefixed = Vec::with_capacity(credentials.len() + 3);
                    prefixed.extend_from_slice(b"%40");
                    prefixed.extend_from_slice(&credentials);
                    credentials = prefixed;
                }
                self.at_sign_seen = true;

                for b in credentials {
                    if b == b':' && !self.password_token_seen {
                        self.password_token_seen = true;
                        continue;
                    }
                    let target = if self.password_token_seen {
                        &mut self.url.password
                    } else {
                        &mut self.url.username
                    };
                    for &e in encode_byte(b, EncodeSet::Userinfo).as_bytes() {
                        target.push(e as char);
                    }
                }
                Ok(Step::Advance)
            }
            Some(b) if !self.is_authority_terminator(byte) => {
                self.buffer.push(b);
                Ok(Step::Advance)
            }
            _ => {
                if self.at_sign_seen && self.buffer.is_empty() {
                    return Err(self.fail(ParseErrorKind::InvalidHost));
                }
                // Hand the host candidate back to the host state byte by
                // byte.
                self.pointer -= self.buffer.len();
                self.buffer.clear();
                self.state = State::Host;
                Ok(Step::Stay)
            }
        }
    }

    fn on_host(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        if self.state_override.is_some() && self.url.scheme == "file" {
            self.state = State::FileHost;
            return Ok(Step::Stay);
        }

        match byte {
            Some(b':') if !self.inside_brackets => {
                if self.buffer.is_empty() {
                    return Err(self.fail(ParseErrorKind::InvalidHost));
                }
                if self.state_override == Some(State::Hostname) {
                    return Ok(Step::Done);
                }
                let text = self.take_buffer_string()?;
                let host = Host::parse(&text, self.url.is_special())
                    .map_err(|kind| self.fail(kind))?;
                self.url.host = Some(host);
                self.state = State::Port;
                Ok(Step::Advance)
            }
            Some(b) if !self.is_authority_terminator(byte) => {
                if b == b'[' {
                    self.inside_brackets = true;
                } else if b == b']' {
                    self.inside_brackets = false;
                }
                self.buffer.push(b);
                Ok(Step::Advance)
            }
            _ => {
                if self.url.is_special() && self.buffer.is_empty() {
                    return Err(self.fail(ParseErrorKind::InvalidHost));
                }
                if self.state_override.is_some()
                    && self.buffer.is_empty()
                    && (self.url.includes_credentials() || self.url.port.is_some())
                {
                    return Ok(Step::Done);
                }
                let text = self.take_buffer_string()?;
                let host = Host::parse(&text, self.url.is_special())
                    .map_err(|kind| self.fail(kind))?;
                self.url.host = Some(host);
                if self.state_override.is_some() {
                    return Ok(Step::Done);
                }
                self.state = State::PathStart;
                Ok(Step::Stay)
            }
        }
    }

    fn on_port(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b) if b.is_ascii_digit() => {
                self.buffer.push(b);
                Ok(Step::Advance)
            }
            _ if self.is_authority_terminator(byte) || self.state_override.is_some() => {
                if !self.buffer.is_empty() {
                    let text = self.take_buffer_string()?;
                    let port: u32 = text
                        .parse()
                        .map_err(|_| self.fail(ParseErrorKind::InvalidPort))?;
                    if port > u32::from(u16::MAX) {
                        return Err(self.fail(ParseErrorKind::InvalidPort));
                    }
                    let port = port as u16;
                    self.url.port = if self.url.default_port() == Some(port) {
                        None
                    } else {
                        Some(port)
                    };
                }
                if self.state_override.is_some() {
                    return Ok(Step::Done);
                }
                self.state = State::PathStart;
                Ok(Step::Stay)
            }
            _ => Err(self.fail(ParseErrorKind::InvalidPort)),
        }
    }

    fn on_file(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        self.url.scheme = "file".into();
        self.url.host = Some(Host::Empty);

        match byte {
            Some(b @ (b'/' | b'\\')) => {
                if b == b'\\' {
                    self.verr(ValidationError::InvalidReverseSolidus);
                }
                self.state = State::FileSlash;
                Ok(Step::Advance)
            }
            _ => {
                let Some(base) = self.base.filter(|base| base.scheme == "file") else {
                    self.state = State::Path;
                    return Ok(Step::Stay);
                };

                self.url.host = base.host.clone();
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();

                match byte {
                    Some(b'?') => {
                        self.url.query = Some(String::new());
                        self.state = State::Query;
                        Ok(Step::Advance)
                    }
                    Some(b'#') => {
                        self.url.fragment = Some(String::new());
                        self.state = State::Fragment;
                        Ok(Step::Advance)
                    }
                    None => Ok(Step::Done),
                    Some(_) => {
                        self.url.query = None;
                        if starts_with_windows_drive_letter(self.remaining_with_current()) {
                            // A drive letter resets the inherited path
                            // rather than merging with it.
                            self.verr(ValidationError::FileInvalidWindowsDriveLetter);
                            self.url.path = PathKind::Segments(Vec::new());
                        } else {
                            self.url.shorten_path();
                        }
                        self.state = State::Path;
                        Ok(Step::Stay)
                    }
                }
            }
        }
    }

    fn on_file_slash(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b @ (b'/' | b'\\')) => {
                if b == b'\\' {
                    self.verr(ValidationError::InvalidReverseSolidus);
                }
                self.state = State::FileHost;
                Ok(Step::Advance)
            }
            _ => {
                if let Some(base) = self.base.filter(|base| base.scheme == "file") {
                    self.url.host = base.host.clone();
                    if !starts_with_windows_drive_letter(self.remaining_with_current())
                        && let Some(first) = base.path_segments().first()
                        && is_normalized_windows_drive_letter(first)
                    {
                        // The drive letter survives even though the rest
                        // of the base path does not.
                        let first = first.clone();
                        self.url.path_segments_mut().push(first);
                    }
                }
                self.state = State::Path;
                Ok(Step::Stay)
            }
        }
    }

    fn on_file_host(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            None | Some(b'/') | Some(b'\\') | Some(b'?') | Some(b'#') => {
                let text = self.take_buffer_string()?;

                if self.state_override.is_none() && is_windows_drive_letter(&text) {
                    // Not a host: keep the buffer and let the path state
                    // consume it as the first segment.
                    self.verr(ValidationError::FileInvalidWindowsDriveLetterHost);
                    self.buffer = text.into_bytes();
                    self.state = State::Path;
                    return Ok(Step::Stay);
                }

                if text.is_empty() {
                    self.url.host = Some(Host::Empty);
                } else {
                    let host =
                        Host::parse(&text, true).map_err(|kind| self.fail(kind))?;
                    self.url.host = Some(if host.is_localhost() {
                        Host::Empty
                    } else {
                        host
                    });
                }
                if self.state_override.is_some() {
                    return Ok(Step::Done);
                }
                self.state = State::PathStart;
                Ok(Step::Stay)
            }
            Some(b) => {
                self.buffer.push(b);
                Ok(Step::Advance)
            }
        }
    }

    fn on_path_start(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        if self.url.is_special() {
            if byte == Some(b'\\') {
                self.verr(ValidationError::InvalidReverseSolidus);
            }
            self.state = State::Path;
            return Ok(if matches!(byte, Some(b'/') | Some(b'\\')) {
                Step::Advance
            } else {
                Step::Stay
            });
        }

        match byte {
            Some(b'?') if self.state_override.is_none() => {
                self.url.query = Some(String::new());
                self.state = State::Query;
                Ok(Step::Advance)
            }
            Some(b'#') if self.state_override.is_none() => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
                Ok(Step::Advance)
            }
            Some(b) => {
                self.state = State::Path;
                Ok(if b == b'/' { Step::Advance } else { Step::Stay })
            }
            None => {
                if self.state_override.is_some() && self.url.host.is_none() {
                    self.url.path_segments_mut().push(String::new());
                }
                Ok(Step::Done)
            }
        }
    }

    fn on_path(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        let at_segment_end = matches!(byte, None | Some(b'/'))
            || (self.url.is_special() && byte == Some(b'\\'))
            || (self.state_override.is_none() && matches!(byte, Some(b'?') | Some(b'#')));

        if at_segment_end {
            if self.url.is_special() && byte == Some(b'\\') {
                self.verr(ValidationError::InvalidReverseSolidus);
            }

            let segment = self.take_buffer_string()?;
            let slash_next =
                matches!(byte, Some(b'/')) || (self.url.is_special() && byte == Some(b'\\'));

            if is_double_dot_segment(&segment) {
                self.url.shorten_path();
                if !slash_next {
                    self.url.path_segments_mut().push(String::new());
                }
            } else if is_single_dot_segment(&segment) {
                if !slash_next {
                    self.url.path_segments_mut().push(String::new());
                }
            } else {
                let mut segment = segment;
                if self.url.scheme == "file"
                    && self.url.path_segments().is_empty()
                    && is_windows_drive_letter(&segment)
                {
                    // "C|" becomes "C:".
                    segment.replace_range(1..2, ":");
                }
                self.url.path_segments_mut().push(segment);
            }

            return match byte {
                Some(b'?') => {
                    self.url.query = Some(String::new());
                    self.state = State::Query;
                    Ok(Step::Advance)
                }
                Some(b'#') => {
                    self.url.fragment = Some(String::new());
                    self.state = State::Fragment;
                    Ok(Step::Advance)
                }
                Some(_) => Ok(Step::Advance),
                None => Ok(Step::Done),
            };
        }

        let Some(b) = byte else {
            return Ok(Step::Done);
        };
        self.check_url_unit(b);
        if let Some(triple) = self.uppercased_triple(b) {
            self.buffer.extend_from_slice(&triple);
            self.pointer += 2;
        } else {
            self.buffer
                .extend_from_slice(encode_byte(b, EncodeSet::Path).as_bytes());
        }
        Ok(Step::Advance)
    }

    fn on_opaque_path(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b'?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
                Ok(Step::Advance)
            }
            Some(b'#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
                Ok(Step::Advance)
            }
            Some(b) => {
                self.check_url_unit(b);
                let triple = self.uppercased_triple(b);
                let PathKind::Opaque(path) = &mut self.url.path else {
                    return Err(self.fail(ParseErrorKind::InvalidUrl));
                };
                if let Some(triple) = triple {
                    for t in triple {
                        path.push(t as char);
                    }
                    self.pointer += 2;
                } else {
                    push_encoded_byte(path, b, EncodeSet::C0Control);
                }
                Ok(Step::Advance)
            }
            None => Ok(Step::Done),
        }
    }

    fn on_query(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b'#') if self.state_override.is_none() => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
                Ok(Step::Advance)
            }
            Some(b) => {
                self.check_url_unit(b);
                let triple = self.uppercased_triple(b);
                // The path set, with the special-scheme quirk for
                // apostrophes.
                let escape_quote = self.url.is_special() && b == b'\'';
                let query = self.url.query.get_or_insert_with(String::new);
                if let Some(triple) = triple {
                    for t in triple {
                        query.push(t as char);
                    }
                    self.pointer += 2;
                } else if escape_quote {
                    query.push_str("%27");
                } else {
                    push_encoded_byte(query, b, EncodeSet::Path);
                }
                Ok(Step::Advance)
            }
            None => Ok(Step::Done),
        }
    }

    fn on_fragment(&mut self, byte: Option<u8>) -> Result<Step, ParseError> {
        match byte {
            Some(b) => {
                self.check_url_unit(b);
                let triple = self.uppercased_triple(b);
                let fragment = self.url.fragment.get_or_insert_with(String::new);
                if let Some(triple) = triple {
                    for t in triple {
                        fragment.push(t as char);
                    }
                    self.pointer += 2;
                } else {
                    push_encoded_byte(fragment, b, EncodeSet::Fragment);
                }
                Ok(Step::Advance)
            }
            None => Ok(Step::Done),
        }
    }
}

fn is_single_dot_segment(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot_segment(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}

/// ASCII bytes that are URL code points; everything non-ASCII is one.
fn is_url_code_point(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'_'
                | b'~'
        )
}
