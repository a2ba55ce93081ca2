use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Resources
// ============================================================================

/// The remote resource kinds, one per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    EquipmentClass,
    Equipment,
    Monitoring,
    Client,
    Location,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::EquipmentClass,
        Resource::Equipment,
        Resource::Monitoring,
        Resource::Client,
        Resource::Location,
    ];

    /// Path segment of the REST collection (the server is case sensitive).
    pub fn endpoint(self) -> &'static str {
        match self {
            Resource::EquipmentClass => "CEquipamento",
            Resource::Equipment => "Equipamento",
            Resource::Monitoring => "Monitoramento",
            Resource::Client => "Cliente",
            Resource::Location => "Localizacao",
        }
    }

    /// Screen title shown in the drawer and the list header.
    pub fn title(self) -> &'static str {
        match self {
            Resource::EquipmentClass => "Equipment Classes",
            Resource::Equipment => "Equipment",
            Resource::Monitoring => "Monitoring",
            Resource::Client => "Clients",
            Resource::Location => "Locations",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Resource::EquipmentClass => "equipment class",
            Resource::Equipment => "equipment",
            Resource::Monitoring => "monitoring event",
            Resource::Client => "client",
            Resource::Location => "location",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Resource::EquipmentClass => "equipment classes",
            Resource::Equipment => "equipment",
            Resource::Monitoring => "monitoring events",
            Resource::Client => "clients",
            Resource::Location => "locations",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Resource::EquipmentClass => 0,
            Resource::Equipment => 1,
            Resource::Monitoring => 2,
            Resource::Client => 3,
            Resource::Location => 4,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

// ============================================================================
// Location categories
// ============================================================================

/// Fixed set of location categories accepted by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationKind {
    #[default]
    Casa,
    Apartamento,
    Comercio,
    Industria,
    Escola,
    Hospital,
    Predio,
    Empresa,
    Outro,
}

impl LocationKind {
    pub const ALL: [LocationKind; 9] = [
        LocationKind::Casa,
        LocationKind::Apartamento,
        LocationKind::Comercio,
        LocationKind::Industria,
        LocationKind::Escola,
        LocationKind::Hospital,
        LocationKind::Predio,
        LocationKind::Empresa,
        LocationKind::Outro,
    ];

    pub const LABELS: [&'static str; 9] = [
        "Casa",
        "Apartamento",
        "Comercio",
        "Industria",
        "Escola",
        "Hospital",
        "Predio",
        "Empresa",
        "Outro",
    ];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.position()]
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    /// Looks a category up by position, wrapping out-of-range values to the first.
    pub fn from_position(position: usize) -> Self {
        Self::ALL.get(position).copied().unwrap_or_default()
    }
}

// ============================================================================
// Records (server → client)
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EquipmentClass {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "decimal")]
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Monitoring {
    pub id: i64,
    pub name: String,
    pub event: String,
    /// Assigned by the server when the event is recorded.
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub status: bool,
    pub localizacao: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cell_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub passcode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub address: String,
    #[serde(rename = "Location")]
    pub kind: LocationKind,
}

/// Accepts a decimal encoded either as a JSON number or as a string
/// (Django REST renders `DecimalField` as `"12.50"`).
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Raw::Null(()) => Ok(0.0),
    }
}

/// One record of any resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    EquipmentClass(EquipmentClass),
    Equipment(Equipment),
    Monitoring(Monitoring),
    Client(Client),
    Location(Location),
}

impl Record {
    /// Decodes a list response body for the given resource.
    pub fn parse_list(resource: Resource, body: &str) -> Result<Vec<Record>, serde_json::Error> {
        let records = match resource {
            Resource::EquipmentClass => serde_json::from_str::<Vec<EquipmentClass>>(body)?
                .into_iter()
                .map(Record::EquipmentClass)
                .collect(),
            Resource::Equipment => serde_json::from_str::<Vec<Equipment>>(body)?
                .into_iter()
                .map(Record::Equipment)
                .collect(),
            Resource::Monitoring => serde_json::from_str::<Vec<Monitoring>>(body)?
                .into_iter()
                .map(Record::Monitoring)
                .collect(),
            Resource::Client => serde_json::from_str::<Vec<Client>>(body)?
                .into_iter()
                .map(Record::Client)
                .collect(),
            Resource::Location => serde_json::from_str::<Vec<Location>>(body)?
                .into_iter()
                .map(Record::Location)
                .collect(),
        };
        Ok(records)
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::EquipmentClass(r) => r.id,
            Record::Equipment(r) => r.id,
            Record::Monitoring(r) => r.id,
            Record::Client(r) => r.id,
            Record::Location(r) => r.id,
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            Record::EquipmentClass(_) => Resource::EquipmentClass,
            Record::Equipment(_) => Resource::Equipment,
            Record::Monitoring(_) => Resource::Monitoring,
            Record::Client(_) => Resource::Client,
            Record::Location(_) => Resource::Location,
        }
    }

    /// Headline shown for the record in a list.
    pub fn title(&self) -> String {
        match self {
            Record::EquipmentClass(r) => r.name.clone(),
            Record::Equipment(r) => r.name.clone(),
            Record::Monitoring(r) => r.name.clone(),
            Record::Client(r) => format!("{} {}", r.first_name, r.last_name),
            Record::Location(r) => r.kind.label().to_string(),
        }
    }

    /// Labelled detail lines shown under the title.
    pub fn details(&self) -> Vec<String> {
        match self {
            Record::EquipmentClass(r) => non_empty(vec![r.description.clone()]),
            Record::Equipment(r) => {
                let mut lines = non_empty(vec![r.description.clone()]);
                if !r.model.is_empty() {
                    lines.push(format!("Model: {}", r.model));
                }
                lines.push(format!("Price: {:.2}", r.price));
                lines
            }
            Record::Monitoring(r) => vec![
                format!("Event: {}", r.event),
                format!(
                    "Date/Time: {}",
                    r.date_time.as_deref().map(format_timestamp).unwrap_or_else(|| "-".to_string())
                ),
                format!("Status: {}", if r.status { "Active" } else { "Inactive" }),
                format!("Location: {}", r.localizacao),
            ],
            Record::Client(r) => vec![
                format!("Address: {}", r.address),
                format!("Cell phone: {}", r.cell_phone),
                format!("Email: {}", r.email),
            ],
            Record::Location(r) => vec![format!("Address: {}", r.address)],
        }
    }
}

fn non_empty(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().filter(|l| !l.is_empty()).collect()
}

/// Formats a server timestamp in local time, passing through anything unparseable.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

// ============================================================================
// Payloads (client → server)
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EquipmentClassDraft {
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EquipmentDraft {
    pub name: String,
    pub description: String,
    pub model: String,
    pub price: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonitoringDraft {
    pub name: String,
    pub event: String,
    pub status: bool,
    pub localizacao: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub cell_phone: String,
    pub email: String,
    pub passcode: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub address: String,
    #[serde(rename = "Location")]
    pub kind: LocationKind,
}

/// The writable fields of a record, sent as the JSON body of POST and PUT.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    EquipmentClass(EquipmentClassDraft),
    Equipment(EquipmentDraft),
    Monitoring(MonitoringDraft),
    Client(ClientDraft),
    Location(LocationDraft),
}

impl Payload {
    pub fn resource(&self) -> Resource {
        match self {
            Payload::EquipmentClass(_) => Resource::EquipmentClass,
            Payload::Equipment(_) => Resource::Equipment,
            Payload::Monitoring(_) => Resource::Monitoring,
            Payload::Client(_) => Resource::Client,
            Payload::Location(_) => Resource::Location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_match_server_routes() {
        let endpoints: Vec<&str> = Resource::ALL.iter().map(|r| r.endpoint()).collect();
        assert_eq!(
            endpoints,
            vec!["CEquipamento", "Equipamento", "Monitoramento", "Cliente", "Localizacao"]
        );
    }

    #[test]
    fn test_resource_index_matches_all_order() {
        for (i, resource) in Resource::ALL.iter().enumerate() {
            assert_eq!(resource.index(), i);
        }
    }

    #[test]
    fn test_equipment_price_accepts_string_and_number() {
        let body = r#"[
            {"id": 1, "name": "Camera", "description": "Dome", "model": "X1", "price": "199.90"},
            {"id": 2, "name": "Sensor", "description": "", "model": "", "price": 12}
        ]"#;
        let records = Record::parse_list(Resource::Equipment, body).unwrap();
        assert_eq!(records.len(), 2);
        match &records[0] {
            Record::Equipment(e) => assert!((e.price - 199.90).abs() < f64::EPSILON),
            other => panic!("unexpected record: {:?}", other),
        }
        match &records[1] {
            Record::Equipment(e) => assert_eq!(e.price, 12.0),
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_equipment_without_model_or_price() {
        // The server may omit fields it never received
        let body = r#"[{"id": 3, "name": "Siren", "description": "Loud"}]"#;
        let records = Record::parse_list(Resource::Equipment, body).unwrap();
        assert_eq!(records[0].details(), vec!["Loud", "Price: 0.00"]);
    }

    #[test]
    fn test_location_uses_capitalized_key() {
        let body = r#"[{"id": 4, "address": "Rua A, 10", "Location": "Hospital"}]"#;
        let records = Record::parse_list(Resource::Location, body).unwrap();
        assert_eq!(records[0].title(), "Hospital");
        assert_eq!(records[0].details(), vec!["Address: Rua A, 10"]);

        let draft = Payload::Location(LocationDraft {
            address: "Rua B".to_string(),
            kind: LocationKind::Escola,
        });
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"address": "Rua B", "Location": "Escola"})
        );
    }

    #[test]
    fn test_unknown_location_kind_is_rejected() {
        let body = r#"[{"id": 4, "address": "Rua A", "Location": "Castelo"}]"#;
        assert!(Record::parse_list(Resource::Location, body).is_err());
    }

    #[test]
    fn test_monitoring_details() {
        let body = r#"[{"id": 9, "name": "Door", "event": "Opened", "date_time": null, "status": true, "localizacao": 4}]"#;
        let records = Record::parse_list(Resource::Monitoring, body).unwrap();
        let details = records[0].details();
        assert_eq!(details[0], "Event: Opened");
        assert_eq!(details[1], "Date/Time: -");
        assert_eq!(details[2], "Status: Active");
        assert_eq!(details[3], "Location: 4");
    }

    #[test]
    fn test_monitoring_payload_has_no_timestamp() {
        let payload = Payload::Monitoring(MonitoringDraft {
            name: "Door".to_string(),
            event: "Opened".to_string(),
            status: false,
            localizacao: 2,
        });
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("date_time").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["localizacao"], 2);
    }

    #[test]
    fn test_client_title_joins_names() {
        let body = r#"[{"id": 1, "first_name": "Ana", "last_name": "Lima", "address": "Rua C",
            "cell_phone": "555", "email": "ana@example.com", "passcode": "s3cr3t"}]"#;
        let records = Record::parse_list(Resource::Client, body).unwrap();
        assert_eq!(records[0].title(), "Ana Lima");
        assert_eq!(records[0].id(), 1);
        assert_eq!(records[0].resource(), Resource::Client);
        // Passcode is never displayed
        assert!(records[0].details().iter().all(|l| !l.contains("s3cr3t")));
    }

    #[test]
    fn test_format_timestamp_passes_through_garbage() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert!(format_timestamp("2024-05-01T12:00:00Z").starts_with("2024-05-0"));
    }

    #[test]
    fn test_location_kind_positions() {
        assert_eq!(LocationKind::from_position(5), LocationKind::Hospital);
        assert_eq!(LocationKind::from_position(99), LocationKind::Casa);
        assert_eq!(LocationKind::Outro.position(), 8);
        assert_eq!(LocationKind::Predio.label(), "Predio");
    }
}
