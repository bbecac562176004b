use serde::{Deserialize, Serialize};

use super::fields;

/// A tradeable commodity as listed by the commodities endpoint.
///
/// Serializes back to the per-item metadata kept in the dated audit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: String,
    #[serde(default, deserialize_with = "fields::string")]
    pub code: String,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_visible: u8,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_available: u8,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_illegal: u8,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_temporary: u8,
}

impl Commodity {
    pub fn is_listed(&self) -> bool {
        self.is_visible == 1 && self.is_available == 1
    }
}
