//! `mailto:` fallback composition.
//!
//! When the remote submission fails, the same payload is turned into a
//! message the visitor's own mail client can send.

use crate::form::Payload;

/// Subject line: the chosen service, else the contact topic, else "General".
pub fn subject(payload: &Payload) -> String {
    let topic = ["service", "type"]
        .iter()
        .filter_map(|key| payload.get(key))
        .find(|v| !v.is_empty())
        .unwrap_or("General");
    format!("Website enquiry — {topic}")
}

/// One `key: value` line per payload entry, each newline-terminated.
pub fn body(payload: &Payload) -> String {
    payload
        .iter()
        .map(|(k, v)| format!("{k}: {v}\n"))
        .collect()
}

pub fn mailto_url(to: &str, payload: &Payload) -> String {
    format!(
        "mailto:{to}?subject={}&body={}",
        encode_component(&subject(payload)),
        encode_component(&body(payload))
    )
}

/// Percent-encodes like the browser's `encodeURIComponent`, which also
/// leaves `! ' ( ) *` as they are.
fn encode_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_prefers_service() {
        let p: Payload = [("type", "Quote"), ("service", "Pavers")].into_iter().collect();
        assert_eq!(subject(&p), "Website enquiry — Pavers");
    }

    #[test]
    fn subject_falls_back_to_type() {
        let p: Payload = [("type", "Delivery")].into_iter().collect();
        assert_eq!(subject(&p), "Website enquiry — Delivery");
    }

    #[test]
    fn empty_service_falls_through() {
        let p: Payload = [("service", ""), ("type", "Quote")].into_iter().collect();
        assert_eq!(subject(&p), "Website enquiry — Quote");
    }

    #[test]
    fn subject_defaults_to_general() {
        let p: Payload = [("name", "A")].into_iter().collect();
        assert_eq!(subject(&p), "Website enquiry — General");
    }

    #[test]
    fn body_lines_in_payload_order() {
        let p: Payload = [("name", "Lebo"), ("message", "Hi")].into_iter().collect();
        assert_eq!(body(&p), "name: Lebo\nmessage: Hi\n");
    }

    #[test]
    fn url_is_encoded() {
        let p: Payload = [("name", "A & B"), ("type", "Quote")].into_iter().collect();
        let url = mailto_url("info@example.co.za", &p);
        assert!(url.starts_with("mailto:info@example.co.za?subject=Website%20enquiry%20%E2%80%94%20Quote&body="));
        assert!(url.ends_with("name%3A%20A%20%26%20B%0Atype%3A%20Quote%0A"));
    }

    #[test]
    fn url_matches_browser_encoding() {
        let p: Payload = [("company", "Mokoena (Pty) Ltd*"), ("message", "Urgent! It's for Monday")]
            .into_iter()
            .collect();
        let url = mailto_url("info@example.co.za", &p);
        assert!(url.contains("company%3A%20Mokoena%20(Pty)%20Ltd*%0A"));
        assert!(url.contains("message%3A%20Urgent!%20It's%20for%20Monday%0A"));
        assert!(!url.contains("%28") && !url.contains("%21") && !url.contains("%27"));
    }
}
