use crate::compat::{String, ToString, Vec};
use crate::unicode::percent_encode::percent_decode;
use crate::url::Url;

/// An ordered, editable list of query name/value pairs.
///
/// Parsing accepts the same pair grammar as [`Url::query_pairs`]; the
/// serialization is `application/x-www-form-urlencoded` style, with
/// spaces written as `+`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    params: Vec<(String, String)>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parse from a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (decode_component(name), decode_component(value)),
                None => (decode_component(pair), String::new()),
            })
            .collect();

        Self { params }
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.params.push((name.to_string(), value.to_string()));
    }

    /// Delete pairs with the given name; with `value`, only exact
    /// name/value matches go.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.params.retain(|(n, v)| n != name || v != value),
            None => self.params.retain(|(n, _)| n != name),
        }
    }

    /// First value for a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a name, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether a name (or exact name/value pair) is present.
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.params.iter().any(|(n, v)| n == name && v == value),
            None => self.params.iter().any(|(n, _)| n == name),
        }
    }

    /// Set a name to a single value, dropping its other occurrences but
    /// keeping the first one's position.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        self.params.retain_mut(|(n, v)| {
            if n != name {
                return true;
            }
            if replaced {
                return false;
            }
            replaced = true;
            *v = value.to_string();
            true
        });
        if !replaced {
            self.append(name, value);
        }
    }

    /// Stable sort by name.
    pub fn sort(&mut self) {
        self.params.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, v)| v.as_str())
    }

    /// Serialize without a leading `?`; empty when there are no pairs.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            encode_component_into(&mut out, name);
            out.push('=');
            encode_component_into(&mut out, value);
        }
        out
    }
}

impl Url {
    /// Parse this URL's query into an editable pair list.
    pub fn search_params(&self) -> UrlSearchParams {
        UrlSearchParams::parse(self.query().unwrap_or(""))
    }
}

impl core::fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for UrlSearchParams {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }
}

fn encode_component_into(out: &mut String, input: &str) {
    use core::fmt::Write;

    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}

fn decode_component(input: &str) -> String {
    let replaced = input.replace('+', " ");
    let decoded = percent_decode(replaced.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let params = UrlSearchParams::parse("?a=1&b=2&a=3");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get_all("a"), ["1", "3"]);
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_decoding() {
        let params = UrlSearchParams::parse("q=a+b&r=%C3%A9&bare");
        assert_eq!(params.get("q"), Some("a b"));
        assert_eq!(params.get("r"), Some("é"));
        assert_eq!(params.get("bare"), Some(""));
    }

    #[test]
    fn test_set_and_delete() {
        let mut params = UrlSearchParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.get_all("a"), ["9"]);
        assert_eq!(params.serialize(), "a=9&b=2");

        params.delete("b", None);
        assert!(!params.has("b", None));

        params.append("c", "1");
        params.append("c", "2");
        params.delete("c", Some("1"));
        assert_eq!(params.get_all("c"), ["2"]);
    }

    #[test]
    fn test_serialize_encodes() {
        let mut params = UrlSearchParams::new();
        params.append("name", "Jürgen K");
        assert_eq!(params.serialize(), "name=J%C3%BCrgen+K");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut params = UrlSearchParams::parse("b=1&a=2&b=0");
        params.sort();
        assert_eq!(params.serialize(), "a=2&b=1&b=0");
    }
}
