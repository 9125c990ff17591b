use crate::config::Config;
use crate::error::LineupResult;
use crate::lineup::{LineupBuilder, LineupCommand};
use crate::search::{PlayerSearch, SearchWorkflow};
use std::sync::Arc;
use tracing::debug;

/// One editing session: the lineup controller plus the search driver that
/// executes its effects. All mutation goes through [`LineupSession::dispatch`]
/// and the event pump.
pub struct LineupSession<S: PlayerSearch> {
    lineup: LineupBuilder,
    search: SearchWorkflow<S>,
}

impl<S: PlayerSearch> LineupSession<S> {
    pub fn new(lineup: LineupBuilder, client: Arc<S>, config: &Config) -> Self {
        Self {
            lineup,
            search: SearchWorkflow::new(client, config.debounce()),
        }
    }

    pub fn with_defaults(client: Arc<S>, config: &Config) -> Self {
        Self::new(LineupBuilder::new(config.min_query_len), client, config)
    }

    pub fn lineup(&self) -> &LineupBuilder {
        &self.lineup
    }

    pub fn into_lineup(self) -> LineupBuilder {
        let Self { lineup, search } = self;
        drop(search);
        lineup
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Applies a command and hands its effect to the search driver. Must run
    /// inside a tokio runtime when the command can schedule a search.
    pub fn dispatch(&mut self, command: LineupCommand) -> LineupResult<()> {
        debug!("Dispatch {:?}", command);
        if let Some(effect) = self.lineup.apply(command)? {
            self.search.run(effect);
        }
        Ok(())
    }

    /// Waits for the next search event and applies it. Returns whether it
    /// changed the editor (stale events do not). Returns `false` at once when
    /// nothing is scheduled or in flight.
    pub async fn next_search_event(&mut self) -> bool {
        match self.search.recv().await {
            Some(event) => self.lineup.editor_mut().handle_search_event(event),
            None => false,
        }
    }

    /// Applies every event that has already arrived. Returns how many
    /// changed the editor.
    pub fn drain_search_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.search.try_recv() {
            if self.lineup.editor_mut().handle_search_event(event) {
                applied += 1;
            }
        }
        applied
    }
}
