/// IPv4 address literals per the WHATWG URL host rules: up to four
/// dot-separated parts in decimal, octal, or hexadecimal, the final part
/// spanning whatever bytes remain.
use crate::compat::{String, format};
use crate::error::ParseErrorKind;

/// Whether the last dotted label of a host is numeric, which forces the
/// whole host through the IPv4 parser.
pub fn ends_in_a_number(input: &str) -> bool {
    let input = input.strip_suffix('.').unwrap_or(input);

    let Some(last_label) = input.rsplit('.').next() else {
        return false;
    };
    if last_label.is_empty() {
        return false;
    }

    if last_label.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }

    // "0x" prefixed labels are hexadecimal; a bare "0x" counts as zero.
    if let Some(hex) = last_label
        .strip_prefix("0x")
        .or_else(|| last_label.strip_prefix("0X"))
    {
        return hex.bytes().all(|b| b.is_ascii_hexdigit());
    }

    false
}

/// Parse an IPv4 address string, accumulating octets in one pass.
pub fn parse_ipv4(input: &str) -> Result<u32, ParseErrorKind> {
    // A single trailing dot is allowed and ignored.
    let input = input.strip_suffix('.').unwrap_or(input);
    if input.is_empty() {
        return Err(ParseErrorKind::InvalidIpv4);
    }

    let mut address: u64 = 0;
    let mut seen: u32 = 0;
    let mut parts = input.split('.').peekable();

    while let Some(part) = parts.next() {
        let number = ipv4_part(part)?;
        seen += 1;
        if seen > 4 {
            return Err(ParseErrorKind::InvalidIpv4);
        }
        if parts.peek().is_some() {
            // Interior parts are single octets.
            if number > 0xFF {
                return Err(ParseErrorKind::InvalidIpv4);
            }
            address = (address << 8) | number;
        } else {
            // The last part fills the bytes the interior parts left open.
            let remaining_bits = 8 * (5 - seen);
            if number >> remaining_bits != 0 {
                return Err(ParseErrorKind::InvalidIpv4);
            }
            address = (address << remaining_bits) | number;
        }
    }

    Ok(address as u32)
}

/// One dotted part: `0x` means hexadecimal, a leading zero means octal,
/// anything else decimal. A bare `0x` counts as zero.
fn ipv4_part(part: &str) -> Result<u64, ParseErrorKind> {
    if part.is_empty() {
        return Err(ParseErrorKind::InvalidIpv4);
    }

    let (digits, radix) = if let Some(hex) = part
        .strip_prefix("0x")
        .or_else(|| part.strip_prefix("0X"))
    {
        (hex, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };

    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, radix).map_err(|_| ParseErrorKind::InvalidIpv4)
}

/// Serialize to dotted decimal.
pub fn serialize_ipv4(address: u32) -> String {
    let [a, b, c, d] = address.to_be_bytes();
    format!("{a}.{b}.{c}.{d}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_ipv4("192.168.1.1").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("127.0.0.1.").unwrap(), 0x7F000001);
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert_eq!(parse_ipv4("0xC0A80101").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("192.0x00A80001").unwrap(), 0xC0A80001);
        assert_eq!(parse_ipv4("0300.0250.01.01").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("0x").unwrap(), 0);
    }

    #[test]
    fn test_short_forms() {
        // Fewer than four parts: the last number spans the remainder.
        assert_eq!(parse_ipv4("127.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("2130706433").unwrap(), 0x7F000001);
    }

    #[test]
    fn test_rejects() {
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("1.2.3.4.5").is_err());
        assert!(parse_ipv4("256.1.1.1").is_err());
        assert!(parse_ipv4("1.2.3.4000").is_err());
        assert!(parse_ipv4("a.b.c.d").is_err());
        assert!(parse_ipv4("1..3.4").is_err());
        assert!(parse_ipv4("0008.1.1.1").is_err());
    }

    #[test]
    fn test_ends_in_a_number() {
        assert!(ends_in_a_number("192.168.1.1"));
        assert!(ends_in_a_number("example.42"));
        assert!(ends_in_a_number("example.42."));
        assert!(ends_in_a_number("0xFF"));
        assert!(ends_in_a_number("example.0x"));
        assert!(!ends_in_a_number("example.com"));
        assert!(!ends_in_a_number("example.2com"));
        assert!(!ends_in_a_number(""));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize_ipv4(0xC0A80101), "192.168.1.1");
        assert_eq!(serialize_ipv4(0x7F000001), "127.0.0.1");
        assert_eq!(serialize_ipv4(0), "0.0.0.0");
    }
}
