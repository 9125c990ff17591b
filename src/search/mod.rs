//! Player search: the remote client, the debounced request driver and the
//! messages that flow between the driver and the pitch editor.

pub mod client;
pub mod workflow;

use crate::error::{LineupError, LineupResult};
use lineup_protocol::PlayerRecord;
use std::future::Future;

pub use self::client::SearchClient;
pub use self::workflow::SearchWorkflow;

/// Anything that can look players up by a name fragment.
pub trait PlayerSearch: Send + Sync + 'static {
    fn search(&self, name: &str) -> impl Future<Output = LineupResult<Vec<PlayerRecord>>> + Send;
}

/// A settled query the editor wants sent, tagged with the generation that
/// must still be current when the answer comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Instruction from the editor to the search driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    Schedule(SearchTicket),
    Cancel,
}

/// Progress reported by the search driver.
#[derive(Debug)]
pub enum SearchEvent {
    Started {
        generation: u64,
    },
    Finished {
        generation: u64,
        outcome: Result<Vec<PlayerRecord>, LineupError>,
    },
}

impl SearchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation } | Self::Finished { generation, .. } => *generation,
        }
    }
}
