use serde::Deserialize;
use serde_json::{Map, Value};

/// Filter request body
///
/// Both fields are required; the handler rejects requests missing either
/// with a 400 rather than failing deserialization, so the client sees a
/// consistent error shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub layer_id: Option<String>,
    pub filters: Option<Map<String, Value>>,
}
