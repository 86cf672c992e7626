//! Fragment-identifier protocol between pages.
//!
//! Two small pieces of state travel in the part of a page address after `#`:
//!
//! - `services.html#q=<term>` prepopulates the services search box.
//! - `enquiry.html#service=<name>` prepopulates the enquiry form's service.
//!
//! The two are read differently. `q` is taken from the percent-decoded
//! fragment after the first `q=`, so a term may itself contain `&` or `=`.
//! `service` is read like a query string: pairs split on `&`, with `+`
//! decoding to a space.

/// Strip a leading `#` if present.
fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Read the search term from a `#q=<term>` fragment.
pub fn search_term(fragment: &str) -> Option<String> {
    let decoded = decode(strip_hash(fragment));
    decoded
        .strip_prefix("q=")
        .map(|rest| rest.split("q=").next().unwrap_or_default().to_string())
}

/// Read a parameter from a query-string style fragment (`a=1&b=2`).
///
/// The first occurrence wins. Returns `Some("")` for `key=` and `None` when
/// the key is absent.
pub fn param(fragment: &str, key: &str) -> Option<String> {
    strip_hash(fragment)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (form_decode(k), form_decode(v)),
            None => (form_decode(pair), String::new()),
        })
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn form_decode(s: &str) -> String {
    decode(&s.replace('+', " "))
}

/// The service name carried over from a detail overlay, if any.
///
/// Empty values count as absent.
pub fn carried_service(fragment: &str) -> Option<String> {
    param(fragment, "service").filter(|v| !v.is_empty())
}

/// Link to the services listing with a prepopulated search.
pub fn services_link(page: &str, term: &str) -> String {
    format!("{page}#q={}", urlencoding::encode(term))
}

/// Link to the enquiry page with a carried-over service name.
pub fn enquiry_link(page: &str, service_title: &str) -> String {
    format!("{page}#service={}", urlencoding::encode(service_title))
}
