use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unsupported squad size {0} (expected 5, 7 or 11)")]
    SquadSize(u8),

    #[error("Unknown formation '{name}' for {size}-a-side")]
    UnknownFormation { size: u8, name: String },

    #[error("Slot {index} out of range (formation has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("No player editor is open")]
    NoEditingSession,

    #[error("No search result at position {0}")]
    NoSuchResult(usize),

    #[error("Invalid slot reference '{0}' (expected 'None', 'Player N' or N)")]
    SlotRef(String),
}

pub type LineupResult<T> = Result<T, LineupError>;
