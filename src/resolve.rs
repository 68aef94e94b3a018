use crate::compat::{String, Vec};
use crate::error::Result;
use crate::url::Url;

impl Url {
    /// Resolve a reference against this URL as the base.
    ///
    /// Follows the RFC 3986 composition rules: an absolute reference
    /// stands alone, an authority-bearing reference keeps the base
    /// scheme only, an empty reference inherits path and query, and a
    /// relative path merges with the base path before dot segments are
    /// removed. The relative states of the parser implement the merge.
    ///
    /// ```
    /// use urlkit::Url;
    ///
    /// let base = Url::parse("http://example.com/foo/bar", None)?;
    /// assert_eq!(base.resolve("baz")?.as_str(), "http://example.com/foo/baz");
    /// assert_eq!(base.resolve("../qux")?.as_str(), "http://example.com/qux");
    /// assert_eq!(base.resolve("?q")?.as_str(), "http://example.com/foo/bar?q");
    /// # Ok::<_, urlkit::ParseError>(())
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Url> {
        Url::parse(reference, Some(self))
    }
}

/// Dot-segment removal over an already-parsed segment list.
///
/// `..` pops the previous segment (a no-op at the root), `.` vanishes,
/// and either one in final position leaves a trailing empty segment so
/// the serialized path keeps its closing `/`.
pub(crate) fn remove_dot_segments(segments: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == segments.len() - 1;
        if is_double_dot(segment) {
            out.pop();
            if is_last {
                out.push(String::new());
            }
        } else if is_single_dot(segment) {
            if is_last {
                out.push(String::new());
            }
        } else {
            out.push(segment.clone());
        }
    }

    out
}

fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}
