//! # Record Forms
//!
//! Every screen edits one record at a time through a `Form`. The form knows
//! its resource's field schema, holds the raw values the user typed, and
//! turns them into a typed `Payload` on submit.
//!
//! ```text
//! Form
//! ├── resource: Resource         // which schema applies
//! ├── values: Vec<FieldValue>    // one per schema field, same order
//! ├── focused: usize             // field receiving input
//! └── editing_id: Option<i64>    // Some → PUT, None → POST
//! ```
//!
//! Create vs. update is decided by `editing_id` alone.

use std::fmt;

use crate::backend::{
    ClientDraft, EquipmentClassDraft, EquipmentDraft, LocationDraft, LocationKind, MonitoringDraft,
    Payload, Record, Resource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Masked when rendered.
    Secret,
    Integer,
    Decimal,
    Toggle,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec { key, label, kind, required }
}

const EQUIPMENT_CLASS_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("description", "Description", FieldKind::Text, false),
];

const EQUIPMENT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("description", "Description", FieldKind::Text, false),
    field("model", "Model", FieldKind::Text, false),
    field("price", "Price", FieldKind::Decimal, false),
];

const MONITORING_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("event", "Event description", FieldKind::Text, true),
    field("localizacao", "Location ID", FieldKind::Integer, true),
    field("status", "Active", FieldKind::Toggle, false),
];

const CLIENT_FIELDS: &[FieldSpec] = &[
    field("first_name", "First name", FieldKind::Text, true),
    field("last_name", "Last name", FieldKind::Text, true),
    field("address", "Address", FieldKind::Text, true),
    field("cell_phone", "Cell phone", FieldKind::Text, true),
    field("email", "Email", FieldKind::Text, true),
    field("passcode", "Passcode", FieldKind::Secret, true),
];

const LOCATION_FIELDS: &[FieldSpec] = &[
    field("address", "Address", FieldKind::Text, true),
    field("Location", "Category", FieldKind::Choice(&LocationKind::LABELS), true),
];

/// Field schema for a resource, in display order.
pub fn schema(resource: Resource) -> &'static [FieldSpec] {
    match resource {
        Resource::EquipmentClass => EQUIPMENT_CLASS_FIELDS,
        Resource::Equipment => EQUIPMENT_FIELDS,
        Resource::Monitoring => MONITORING_FIELDS,
        Resource::Client => CLIENT_FIELDS,
        Resource::Location => LOCATION_FIELDS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
    Choice(usize),
}

impl FieldValue {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Toggle => FieldValue::Toggle(false),
            FieldKind::Choice(_) => FieldValue::Choice(0),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Why a form could not be turned into a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// Labels of required fields left blank.
    Missing(Vec<&'static str>),
    /// A field holds a value that does not parse.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(labels) => write!(f, "required: {}", labels.join(", ")),
            FormError::Invalid { field, reason } => write!(f, "{field}: {reason}"),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub resource: Resource,
    pub values: Vec<FieldValue>,
    pub focused: usize,
    pub editing_id: Option<i64>,
}

impl Form {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            values: schema(resource).iter().map(|f| FieldValue::empty(f.kind)).collect(),
            focused: 0,
            editing_id: None,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        schema(self.resource)
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Back to a blank create form.
    pub fn reset(&mut self) {
        *self = Form::new(self.resource);
    }

    /// Fills the form from an existing record and switches to update mode.
    pub fn load(&mut self, record: &Record) {
        self.reset();
        match record {
            Record::EquipmentClass(r) => {
                self.set_text("name", &r.name);
                self.set_text("description", &r.description);
            }
            Record::Equipment(r) => {
                self.set_text("name", &r.name);
                self.set_text("description", &r.description);
                self.set_text("model", &r.model);
                self.set_text("price", &r.price.to_string());
            }
            Record::Monitoring(r) => {
                self.set_text("name", &r.name);
                self.set_text("event", &r.event);
                self.set_text("localizacao", &r.localizacao.to_string());
                self.set_value("status", FieldValue::Toggle(r.status));
            }
            Record::Client(r) => {
                self.set_text("first_name", &r.first_name);
                self.set_text("last_name", &r.last_name);
                self.set_text("address", &r.address);
                self.set_text("cell_phone", &r.cell_phone);
                self.set_text("email", &r.email);
                self.set_text("passcode", &r.passcode);
            }
            Record::Location(r) => {
                self.set_text("address", &r.address);
                self.set_value("Location", FieldValue::Choice(r.kind.position()));
            }
        }
        self.editing_id = Some(record.id());
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields().iter().position(|f| f.key == key)
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        if let Some(i) = self.position(key) {
            self.values[i] = value;
        }
    }

    fn set_text(&mut self, key: &str, text: &str) {
        self.set_value(key, FieldValue::Text(text.to_string()));
    }

    /// Raw text of a field; empty for non-text fields or unknown keys.
    pub fn text(&self, key: &str) -> &str {
        match self.position(key).map(|i| &self.values[i]) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    fn toggle_value(&self, key: &str) -> bool {
        matches!(
            self.position(key).map(|i| &self.values[i]),
            Some(FieldValue::Toggle(true))
        )
    }

    fn choice_value(&self, key: &str) -> usize {
        match self.position(key).map(|i| &self.values[i]) {
            Some(FieldValue::Choice(c)) => *c,
            _ => 0,
        }
    }

    pub fn focused_spec(&self) -> FieldSpec {
        self.fields()[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.values.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.values.len() - 1) % self.values.len();
    }

    /// Types a character into the focused field. Space flips a toggle.
    pub fn insert_char(&mut self, c: char) {
        let field_spec = self.focused_spec();
        match (&mut self.values[self.focused], field_spec.kind) {
            (FieldValue::Text(s), FieldKind::Integer) => {
                if c.is_ascii_digit() {
                    s.push(c);
                }
            }
            (FieldValue::Text(s), FieldKind::Decimal) => {
                if c.is_ascii_digit() || c == '.' || c == ',' {
                    s.push(c);
                }
            }
            (FieldValue::Text(s), _) => s.push(c),
            (FieldValue::Toggle(b), _) if c == ' ' => *b = !*b,
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let FieldValue::Text(s) = &mut self.values[self.focused] {
            s.pop();
        }
    }

    /// Moves a choice field to its next (or previous) option, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field_spec = self.focused_spec();
        if let (FieldValue::Choice(c), FieldKind::Choice(options)) = (&mut self.values[self.focused], field_spec.kind) {
            let n = options.len();
            *c = if forward { (*c + 1) % n } else { (*c + n - 1) % n };
        }
    }

    /// Text shown for a field: secrets masked, toggles and choices spelled out.
    pub fn display_value(&self, index: usize) -> String {
        let field_spec = self.fields()[index];
        match (&self.values[index], field_spec.kind) {
            (FieldValue::Text(s), FieldKind::Secret) => "*".repeat(s.chars().count()),
            (FieldValue::Text(s), _) => s.clone(),
            (FieldValue::Toggle(b), _) => (if *b { "[x]" } else { "[ ]" }).to_string(),
            (FieldValue::Choice(c), FieldKind::Choice(options)) => {
                format!("< {} >", options.get(*c).copied().unwrap_or(""))
            }
            (FieldValue::Choice(_), _) => String::new(),
        }
    }

    /// Validates the form and builds the request body.
    pub fn to_payload(&self) -> Result<Payload, FormError> {
        let missing: Vec<&'static str> = self
            .fields()
            .iter()
            .zip(&self.values)
            .filter(|(field_spec, value)| {
                let FieldValue::Text(s) = value else {
                    return false;
                };
                // Secrets are taken verbatim, so only an empty one is missing
                let blank = match field_spec.kind {
                    FieldKind::Secret => s.is_empty(),
                    _ => s.trim().is_empty(),
                };
                field_spec.required && blank
            })
            .map(|(field_spec, _)| field_spec.label)
            .collect();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }

        let text = |key: &str| self.text(key).trim().to_string();

        let payload = match self.resource {
            Resource::EquipmentClass => Payload::EquipmentClass(EquipmentClassDraft {
                name: text("name"),
                description: text("description"),
            }),
            Resource::Equipment => Payload::Equipment(EquipmentDraft {
                name: text("name"),
                description: text("description"),
                model: text("model"),
                price: parse_price(&text("price"))?,
            }),
            Resource::Monitoring => Payload::Monitoring(MonitoringDraft {
                name: text("name"),
                event: text("event"),
                status: self.toggle_value("status"),
                localizacao: parse_id(&text("localizacao"), "Location ID")?,
            }),
            Resource::Client => Payload::Client(ClientDraft {
                first_name: text("first_name"),
                last_name: text("last_name"),
                address: text("address"),
                cell_phone: text("cell_phone"),
                email: text("email"),
                passcode: self.text("passcode").to_string(),
            }),
            Resource::Location => Payload::Location(LocationDraft {
                address: text("address"),
                kind: LocationKind::from_position(self.choice_value("Location")),
            }),
        };
        Ok(payload)
    }
}

fn parse_price(raw: &str) -> Result<f64, FormError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    let invalid = |reason: &str| FormError::Invalid {
        field: "Price",
        reason: reason.to_string(),
    };
    let price: f64 = raw.replace(',', ".").parse().map_err(|_| invalid("not a number"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid("must be zero or more"));
    }
    Ok(price)
}

fn parse_id(raw: &str, field: &'static str) -> Result<i64, FormError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FormError::Invalid {
            field,
            reason: "must be a positive whole number".to_string(),
        }),
    }
}
