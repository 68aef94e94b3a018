use crate::compat::{String, Vec};
use crate::host::Host;
use crate::parser::PathKind;
use crate::resolve::remove_dot_segments;
use crate::url::Url;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// Canonicalize the percent triples of one component: uppercase the hex
/// digits, and decode triples whose byte is unreserved.
///
/// Bytes outside triples are left alone; they come from an already
/// canonical serialization. Decoding only ever surfaces unreserved
/// bytes, which no encode set contains, so no re-encoding pass is
/// needed.
fn normalize_triples(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            let value = (hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]);
            if is_unreserved(value) {
                out.push(value);
            } else {
                out.push(b'%');
                out.push(HEX_UPPER[(value >> 4) as usize]);
                out.push(HEX_UPPER[(value & 0x0F) as usize]);
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

impl Url {
    /// Syntax-based normalization.
    ///
    /// Lowercases scheme and host (already canonical after a parse),
    /// uppercases the hex of every percent triple, decodes triples that
    /// encode unreserved bytes, and re-runs dot-segment removal over the
    /// path. Normalization is idempotent.
    ///
    /// ```
    /// use urlkit::Url;
    ///
    /// let url = Url::parse("http://example.com/%7euser/a/../b%2fc", None)?;
    /// assert_eq!(url.normalize().as_str(), "http://example.com/~user/b%2Fc");
    /// # Ok::<_, urlkit::ParseError>(())
    /// ```
    pub fn normalize(&self) -> Url {
        let Ok(mut record) = self.to_record() else {
            return self.clone();
        };

        record.username = normalize_triples(&record.username);
        record.password = normalize_triples(&record.password);

        if let Some(Host::Opaque(host)) = &record.host {
            record.host = Some(Host::Opaque(normalize_triples(host)));
        }

        record.path = match record.path {
            PathKind::Opaque(path) => PathKind::Opaque(normalize_triples(&path)),
            PathKind::Segments(segments) => {
                let normalized: Vec<String> =
                    segments.iter().map(|s| normalize_triples(s)).collect();
                // Decoding can turn "%2E" back into ".", so dot removal
                // runs again over the decoded list.
                PathKind::Segments(remove_dot_segments(&normalized))
            }
        };

        record.query = record.query.map(|q| normalize_triples(&q));
        record.fragment = record.fragment.map(|f| normalize_triples(&f));

        Url::from_record(record, Vec::new())
    }
}
