pub mod client;
pub mod types;

pub use client::{Backend, BackendError, RestBackend};
pub use types::{
    Client, ClientDraft, Equipment, EquipmentClass, EquipmentClassDraft, EquipmentDraft, Location,
    LocationDraft, LocationKind, Monitoring, MonitoringDraft, Payload, Record, Resource,
};
