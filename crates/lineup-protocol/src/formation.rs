use crate::player::PlayerRecord;
use serde::{Deserialize, Serialize};

/// A slot template inside a formation.
///
/// Coordinates are percentages of the pitch (0-100), origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub positions: Vec<Position>,
}

impl Formation {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn roles(&self) -> Vec<&str> {
        self.positions.iter().map(|p| p.role.as_str()).collect()
    }
}

/// A live position marker on the pitch. Identity is its index in the
/// active formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub x: f32,
    pub y: f32,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerRecord>,
}

impl Slot {
    pub fn is_bound(&self) -> bool {
        self.player.is_some()
    }
}

impl From<&Position> for Slot {
    fn from(p: &Position) -> Self {
        Self {
            x: p.x,
            y: p.y,
            role: p.role.clone(),
            player: None,
        }
    }
}
