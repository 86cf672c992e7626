//! Form definitions, validation and payload building.
//!
//! A [`Form`] is an ordered list of [`Field`]s with their current values and
//! invalid flags. The same field definitions drive the generated HTML (so the
//! browser enforces `required`, `type`, `minlength` and `pattern`) and the
//! validator used by the submission pipeline.
//!
//! ## Validation rules
//!
//! Buttons and file inputs are skipped. For every other field, flags from the
//! previous pass are cleared and the first applicable rule decides:
//!
//! 1. required and blank after trimming → invalid
//! 2. email field, non-empty, not `local@domain.tld` → invalid
//! 3. field named `phone`, non-empty, not a South African number → invalid
//! 4. minimum length set and value shorter → invalid
//!
//! Every field is checked, so one pass flags everything that is wrong.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::LazyLock;

/// Email shape shared by the pipeline and the generated pages (unanchored).
pub const EMAIL_PATTERN: &str = r"[^\s@]+@[^\s@]+\.[^\s@]+";

/// South African phone number, also used as the HTML `pattern` attribute
/// (anchored implicitly by the browser).
pub const PHONE_PATTERN: &str = r"\+?27\s?[0-9]{2}\s?[0-9]{3}\s?[0-9]{4}";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{EMAIL_PATTERN})$")).expect("email pattern must compile")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{PHONE_PATTERN})$")).expect("phone pattern must compile")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Enquiry,
    Contact,
}

impl FormKind {
    /// Element id used in the generated page.
    pub fn id(self) -> &'static str {
        match self {
            FormKind::Enquiry => "enquiryForm",
            FormKind::Contact => "contactForm",
        }
    }

    pub fn result_id(self) -> &'static str {
        match self {
            FormKind::Enquiry => "enquiryResult",
            FormKind::Contact => "contactResult",
        }
    }

    /// Whether a service name carried in the fragment is injected on submit.
    pub fn carries_service(self) -> bool {
        matches!(self, FormKind::Enquiry)
    }

    pub fn parse(s: &str) -> Option<FormKind> {
        match s {
            "enquiry" => Some(FormKind::Enquiry),
            "contact" => Some(FormKind::Contact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    TextArea,
    Select(Vec<String>),
    File,
    Button,
}

impl FieldKind {
    /// `type` attribute for `<input>` elements.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::File => "file",
            FieldKind::Button => "submit",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }

    /// Buttons and file inputs take no part in validation.
    fn is_validated(&self) -> bool {
        !matches!(self, FieldKind::File | FieldKind::Button)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub value: String,
    pub invalid: bool,
}

impl Field {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            min_length: None,
            value: String::new(),
            invalid: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    fn check(&self) -> bool {
        let value = self.value.as_str();
        if self.required && value.trim().is_empty() {
            false
        } else if self.kind == FieldKind::Email && !value.is_empty() {
            is_valid_email(value)
        } else if self.name == "phone" && !value.is_empty() {
            is_valid_phone(value)
        } else if let Some(min) = self.min_length {
            value.chars().count() >= min
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set a field's value. Returns `false` if the form has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Run every rule over every field, flagging the invalid ones.
    ///
    /// Returns `true` when nothing was flagged. Running it twice on the same
    /// values yields the same verdict and the same flags.
    pub fn validate(&mut self) -> bool {
        let mut ok = true;
        for field in self.fields.iter_mut().filter(|f| f.kind.is_validated()) {
            field.invalid = !field.check();
            ok &= !field.invalid;
        }
        ok
    }

    pub fn flagged(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.invalid)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Clear every value and flag.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.invalid = false;
        }
    }

    /// Build the submission payload from the current values.
    ///
    /// Named fields other than buttons and file inputs contribute, in form
    /// order. When the form carries a service and its `service` value is
    /// absent or empty, `carried_service` fills it in.
    pub fn payload(&self, carried_service: Option<&str>) -> Payload {
        let mut payload = Payload::default();
        for field in &self.fields {
            if field.name.is_empty() || !field.kind.is_validated() {
                continue;
            }
            payload.set(&field.name, &field.value);
        }
        if self.kind.carries_service() {
            if let Some(service) = carried_service.filter(|s| !s.is_empty()) {
                if payload.get("service").is_none_or(str::is_empty) {
                    payload.set("service", service);
                }
            }
        }
        payload
    }
}

/// Ordered field-name → value mapping sent to the endpoint.
///
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    entries: Vec<(String, String)>,
}

impl Payload {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first entry with this key in place, or append.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::default();
        for (k, v) in iter {
            payload.set(&k.into(), &v.into());
        }
        payload
    }
}

/// Enquiry form: a quote request, optionally for a specific service.
pub fn enquiry_form(service_titles: &[&str]) -> Form {
    Form {
        kind: FormKind::Enquiry,
        fields: vec![
            Field::new("name", "Full name", FieldKind::Text).required(),
            Field::new("email", "Email", FieldKind::Email).required(),
            Field::new("phone", "Phone (+27)", FieldKind::Tel),
            Field::new("company", "Company", FieldKind::Text),
            Field::new(
                "service",
                "Service",
                FieldKind::Select(service_titles.iter().map(|s| s.to_string()).collect()),
            ),
            Field::new("quantity", "Quantity", FieldKind::Number),
            Field::new("message", "Project details", FieldKind::TextArea).min_length(10),
            Field::new("", "Send enquiry", FieldKind::Button),
        ],
    }
}

pub fn contact_form() -> Form {
    let types = ["General", "Quote", "Delivery", "Technical"];
    Form {
        kind: FormKind::Contact,
        fields: vec![
            Field::new("name", "Name", FieldKind::Text).required(),
            Field::new("email", "Email", FieldKind::Email).required(),
            Field::new("phone", "Phone (+27)", FieldKind::Tel),
            Field::new(
                "type",
                "Topic",
                FieldKind::Select(types.iter().map(|s| s.to_string()).collect()),
            ),
            Field::new("message", "Message", FieldKind::TextArea)
                .required()
                .min_length(10),
            Field::new("", "Send message", FieldKind::Button),
        ],
    }
}
