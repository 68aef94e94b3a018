/// States of the URL parser state machine.
///
/// These are the states of the basic URL parser in the WHATWG URL Standard.
/// Setters on the public surface re-enter the machine in one of these states
/// (override mode), which is why the enum is part of the public API: a
/// [`ParseError`](crate::ParseError) reports the state it failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    SchemeStart,
    Scheme,
    NoScheme,
    SpecialRelativeOrAuthority,
    PathOrAuthority,
    Relative,
    RelativeSlash,
    SpecialAuthoritySlashes,
    SpecialAuthorityIgnoreSlashes,
    Authority,
    Host,
    /// Like [`State::Host`] but stops before any port, used by the
    /// hostname setter.
    Hostname,
    Port,
    File,
    FileSlash,
    FileHost,
    PathStart,
    Path,
    /// Single-string path of a cannot-be-a-base URL.
    OpaquePath,
    Query,
    Fragment,
}
