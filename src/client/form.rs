//! Form body encoding for OpenAPI requests

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in form values. Alphanumerics and `-_.*` are sent
/// literally, so open ids and `_`-joined id lists reach the server verbatim.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Joins `key=value` pairs with `&`, escaping values.
pub(crate) fn encode_form<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, FORM_VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}
