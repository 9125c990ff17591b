use serde::{Deserialize, Serialize};

/// A player as returned by the remote search service.
///
/// Every field except `id` and `short_name` is optional on the wire; records
/// are treated as opaque once they are bound to a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_name: Option<String>,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kit_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl PlayerRecord {
    /// Known name when the service provides one, short name otherwise.
    pub fn display_name(&self) -> &str {
        match self.known_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.short_name,
        }
    }

    /// The image URL with surrounding whitespace removed, if any is present.
    pub fn image_src(&self) -> Option<&str> {
        self.img_src
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Body of `GET <base>/player?name=<query>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    // Absent on "no match" responses
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}
