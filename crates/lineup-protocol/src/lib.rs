//! Wire and document types shared by the lineup editor, its search client
//! and anything that stores or exchanges lineups.

pub mod formation;
pub mod player;

pub use formation::{Formation, Position, Slot};
pub use player::{PlayerRecord, SearchResponse};
