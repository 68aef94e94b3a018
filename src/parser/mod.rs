mod machine;
mod record;
mod state;

pub use state::State;

pub(crate) use record::{PathKind, UrlRecord, special_scheme_port};

use crate::compat::{String, ToString, Vec};
use crate::error::{ParseError, Result};
use crate::validation::ValidationError;
use machine::Machine;

/// Fast check for bytes that must be stripped from the interior.
fn has_tab_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Trim C0 controls and spaces from the ends, drop interior tab/CR/LF.
/// Both cleanups are non-fatal and logged.
fn preprocess(input: &str, errors: &mut Vec<ValidationError>) -> String {
    let trimmed = input.trim_matches(|c: char| c as u32 <= 0x20);
    if trimmed.len() != input.len() {
        errors.push(ValidationError::LeadingTrailingWhitespace);
    }

    if has_tab_or_newline(trimmed) {
        errors.push(ValidationError::TabOrNewline);
        trimmed
            .chars()
            .filter(|&c| !matches!(c, '\t' | '\n' | '\r'))
            .collect()
    } else {
        trimmed.to_string()
    }
}

/// Run the state machine over one input.
///
/// `state_override` re-enters the machine at a component for the setter
/// surface; `url` seeds the working record (the default record for a
/// plain parse, the decomposed existing URL for an override parse).
pub(crate) fn parse_into_record(
    input: &str,
    base: Option<&UrlRecord>,
    state_override: Option<State>,
    url: UrlRecord,
) -> Result<(UrlRecord, Vec<ValidationError>)> {
    let mut errors = Vec::new();
    let cleaned = preprocess(input, &mut errors);
    Machine::new(cleaned.as_bytes(), base, state_override, url, errors).run()
}

/// Convenience used by `Url::parse`: a fresh record, no override.
pub(crate) fn parse_url(
    input: &str,
    base: Option<&UrlRecord>,
) -> Result<(UrlRecord, Vec<ValidationError>)> {
    parse_into_record(input, base, None, UrlRecord::default())
}
