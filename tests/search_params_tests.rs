#![allow(clippy::unwrap_used)]

//! UrlSearchParams manipulation plus the query_pairs iterator surface.

use urlkit::{Url, UrlSearchParams};

#[test]
fn test_from_url() {
    let url = Url::parse("http://h/p?a=1&b=two&a=3", None).unwrap();
    let params = url.search_params();
    assert_eq!(params.len(), 3);
    assert_eq!(params.get("a"), Some("1"));
    assert_eq!(params.get("b"), Some("two"));
    assert_eq!(params.get_all("a"), ["1", "3"]);
}

#[test]
fn test_url_without_query() {
    let url = Url::parse("http://h/p", None).unwrap();
    assert!(url.search_params().is_empty());
}

#[test]
fn test_append_serialize_reattach() {
    let url = Url::parse("http://h/p", None).unwrap();
    let mut params = url.search_params();
    params.append("q", "rust urls");
    params.append("page", "2");

    let with_query = url
        .to_builder()
        .query(&params.serialize())
        .finish()
        .unwrap();
    assert_eq!(with_query.as_str(), "http://h/p?q=rust+urls&page=2");
    assert_eq!(with_query.search_params().get("q"), Some("rust urls"));
}

#[test]
fn test_roundtrip_encoding() {
    let mut params = UrlSearchParams::new();
    params.append("key", "a & b = c");
    params.append("unicode", "héllo");
    let serialized = params.serialize();
    let reparsed = UrlSearchParams::parse(&serialized);
    assert_eq!(reparsed, params);
}

#[test]
fn test_set_insert_position() {
    let mut params = UrlSearchParams::parse("x=0&y=1&x=2");
    params.set("x", "9");
    assert_eq!(params.serialize(), "x=9&y=1");
    params.set("z", "new");
    assert_eq!(params.serialize(), "x=9&y=1&z=new");
}

#[test]
fn test_iterators() {
    let params = UrlSearchParams::parse("a=1&b=2");
    assert_eq!(params.names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(params.values().collect::<Vec<_>>(), ["1", "2"]);
    assert_eq!(params.iter().count(), 2);
}

#[test]
fn test_from_iterator() {
    let params: UrlSearchParams = [("a", "1"), ("b", "2")].into_iter().collect();
    assert_eq!(params.serialize(), "a=1&b=2");
}

#[test]
fn test_query_pairs_semicolon_separator() {
    // The iterator honors both pair delimiters; the editable list uses
    // form-urlencoded conventions with '&' only.
    let url = Url::parse("http://h/?a=1;b=2", None).unwrap();
    let pairs: Vec<_> = url.query_pairs().map(|(n, v)| (n.into_owned(), v.into_owned())).collect();
    assert_eq!(pairs, [("a".into(), "1".into()), ("b".into(), "2".into())]);
}
