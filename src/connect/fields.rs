//! Field names with a wire encoding that differs from their in-memory form

/// Fields sent as strict JSON booleans
pub const BOOLEAN_FIELDS: &[&str] = &[
    "allUsers",
    "allowEnvelopePublish",
    "enableLog",
    "includeDocuments",
    "includeSenderAccountasCustomField",
    "includeTimeZoneInformation",
    "requiresAcknowledgement",
    "signMessagewithX509Certificate",
    "useSoapInterface",
];

/// Fields held as lists locally and as comma-joined strings on the wire
pub const CSV_FIELDS: &[&str] = &["envelopeEvents", "recipientEvents", "userIds"];

/// Identifier key of a configuration
pub const CONNECT_ID: &str = "connectId";
