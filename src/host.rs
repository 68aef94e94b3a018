use crate::compat::String;
use crate::error::ParseErrorKind;
use crate::ipv4::{ends_in_a_number, parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::unicode::percent_encode::{EncodeSet, percent_decode, push_encoded_byte};

/// A parsed URL host.
///
/// Domains are ASCII after IDNA processing; the empty host only appears in
/// `file:` URLs and non-special schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    Domain(String),
    Ipv4(u32),
    Ipv6([u16; 8]),
    Opaque(String),
    Empty,
}

// Forbidden in any host; domains additionally reject percent signs,
// controls, and DEL before IDNA runs.
fn is_forbidden_host_byte(b: u8) -> bool {
    matches!(
        b,
        0x00 | b'\t'
            | b'\n'
            | b'\r'
            | b' '
            | b'#'
            | b'/'
            | b':'
            | b'<'
            | b'>'
            | b'?'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'|'
    )
}

fn is_forbidden_domain_byte(b: u8) -> bool {
    is_forbidden_host_byte(b) || b == b'%' || b == 0x7F || b <= 0x1F
}

/// IDNA ToASCII. A domain whose labels are all plain ASCII has nothing to
/// map or validate beyond case, so only Punycode labels and non-ASCII go
/// through the `idna` crate.
fn domain_to_ascii(domain: &str) -> Result<String, ParseErrorKind> {
    if domain.split('.').all(is_plain_ascii_label) {
        return Ok(domain.to_ascii_lowercase());
    }
    idna::domain_to_ascii(domain).map_err(|_| ParseErrorKind::IdnaError)
}

/// Letters, digits, hyphens, underscores, and no `xn--` prefix. Empty
/// labels count as plain.
fn is_plain_ascii_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() >= 4 && bytes[..4].eq_ignore_ascii_case(b"xn--") {
        return false;
    }
    bytes
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
}

impl Host {
    /// Parse host text accumulated by the state machine.
    ///
    /// `is_special` selects domain/IPv4 processing; non-special schemes get
    /// an opaque host instead. The caller has already split off any port.
    pub fn parse(input: &str, is_special: bool) -> Result<Host, ParseErrorKind> {
        if input.starts_with('[') {
            let inner = input
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .ok_or(ParseErrorKind::InvalidIpv6)?;
            return parse_ipv6(inner).map(Host::Ipv6);
        }

        if !is_special {
            return Self::parse_opaque(input);
        }

        if input.is_empty() {
            return Ok(Host::Empty);
        }

        // Percent-decode first so "exa%6Dple" and hidden separators are
        // seen by the byte checks and by IDNA.
        let decoded = percent_decode(input.as_bytes());
        let decoded =
            String::from_utf8(decoded).map_err(|_| ParseErrorKind::InvalidHost)?;
        if decoded.bytes().any(is_forbidden_domain_byte) {
            return Err(ParseErrorKind::InvalidDomainCharacter);
        }

        let ascii = domain_to_ascii(&decoded)?;
        if ascii.is_empty() {
            return Err(ParseErrorKind::InvalidHost);
        }

        if ends_in_a_number(&ascii) {
            return parse_ipv4(&ascii).map(Host::Ipv4);
        }

        Ok(Host::Domain(ascii))
    }

    fn parse_opaque(input: &str) -> Result<Host, ParseErrorKind> {
        if input.is_empty() {
            return Ok(Host::Empty);
        }
        if input.bytes().any(is_forbidden_host_byte) {
            return Err(ParseErrorKind::InvalidHost);
        }

        let mut out = String::with_capacity(input.len());
        for b in input.bytes() {
            push_encoded_byte(&mut out, b, EncodeSet::C0Control);
        }
        Ok(Host::Opaque(out))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Host::Empty)
    }

    /// The `file:` scheme folds this host to the empty host.
    pub fn is_localhost(&self) -> bool {
        matches!(self, Host::Domain(d) if d == "localhost")
    }

    /// Append the serialized host (brackets included for IPv6).
    pub fn write(&self, out: &mut String) {
        match self {
            Host::Domain(d) | Host::Opaque(d) => out.push_str(d),
            Host::Ipv4(addr) => out.push_str(&serialize_ipv4(*addr)),
            Host::Ipv6(pieces) => {
                out.push('[');
                out.push_str(&serialize_ipv6(pieces));
                out.push(']');
            }
            Host::Empty => {}
        }
    }

    /// Reconstruct a host from its canonical serialization.
    ///
    /// Parsing is idempotent over serialized hosts, so this is a plain
    /// re-parse with the empty string short-circuited.
    pub fn from_serialization(input: &str, is_special: bool) -> Result<Host, ParseErrorKind> {
        if input.is_empty() {
            return Ok(Host::Empty);
        }
        Self::parse(input, is_special)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    fn serialized(host: &Host) -> String {
        let mut s = String::new();
        host.write(&mut s);
        s
    }

    #[test]
    fn test_domain() {
        let host = Host::parse("Example.COM", true).unwrap();
        assert_eq!(host, Host::Domain("example.com".to_string()));
        assert_eq!(serialized(&host), "example.com");
    }

    #[test]
    fn test_percent_decoded_domain() {
        let host = Host::parse("exa%6Dple.com", true).unwrap();
        assert_eq!(host, Host::Domain("example.com".to_string()));
    }

    #[test]
    fn test_unicode_domain() {
        let host = Host::parse("日本.jp", true).unwrap();
        assert_eq!(host, Host::Domain("xn--wgv71a.jp".to_string()));
    }

    #[test]
    fn test_punycode_label_goes_through_idna() {
        let host = Host::parse("XN--WGV71A.jp", true).unwrap();
        assert_eq!(host, Host::Domain("xn--wgv71a.jp".to_string()));
        // An empty Punycode payload fails validation.
        assert!(Host::parse("xn--", true).is_err());
    }

    #[test]
    fn test_ipv4_detection() {
        assert_eq!(Host::parse("127.0.0.1", true).unwrap(), Host::Ipv4(0x7F00_0001));
        assert_eq!(Host::parse("0x7F000001", true).unwrap(), Host::Ipv4(0x7F00_0001));
        // Numeric last label means the whole host must be a valid address.
        assert!(Host::parse("example.42", true).is_err());
    }

    #[test]
    fn test_ipv6() {
        let host = Host::parse("[::1]", true).unwrap();
        assert_eq!(host, Host::Ipv6([0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(serialized(&host), "[::1]");
        assert!(Host::parse("[::1", true).is_err());
    }

    #[test]
    fn test_opaque() {
        let host = Host::parse("ex ample", false);
        assert!(host.is_err());

        let host = Host::parse("example.com", false).unwrap();
        assert_eq!(host, Host::Opaque("example.com".to_string()));

        // Printable ASCII passes through, controls are escaped.
        let host = Host::parse("a!b", false).unwrap();
        assert_eq!(serialized(&host), "a!b");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Host::parse("", false).unwrap(), Host::Empty);
        assert_eq!(Host::parse("", true).unwrap(), Host::Empty);
    }

    #[test]
    fn test_localhost() {
        assert!(Host::parse("LOCALHOST", true).unwrap().is_localhost());
        assert!(!Host::parse("localhost.local", true).unwrap().is_localhost());
    }

    #[test]
    fn test_forbidden_domain_bytes() {
        assert!(Host::parse("exa%23mple.org", true).is_err());
        assert!(Host::parse("exa<mple.org", true).is_err());
        assert!(Host::parse("exa mple.org", true).is_err());
    }
}
