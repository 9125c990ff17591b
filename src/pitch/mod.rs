//! The pitch editor: live slots for the active formation, drag handling and
//! the per-slot player editor with its search-and-bind flow.

pub mod modal;

use crate::error::{LineupError, LineupResult};
use crate::geometry::{self, PitchRect};
use crate::search::{SearchEffect, SearchEvent, SearchTicket};
use lineup_protocol::{Formation, PlayerRecord, Slot};
use std::fmt;
use tracing::{debug, info, warn};

pub use self::modal::{query_len, EditingSession, ModalMode, SearchHint};

/// Receives the full slot sequence after every change.
pub trait SlotObserver: Send {
    fn on_slots_changed(&self, slots: &[Slot]);
}

impl<F> SlotObserver for F
where
    F: Fn(&[Slot]) + Send,
{
    fn on_slots_changed(&self, slots: &[Slot]) {
        self(slots)
    }
}

pub struct PitchEditor {
    formation: Formation,
    flipped: bool,
    slots: Vec<Slot>,
    session: Option<EditingSession>,
    generation: u64,
    min_query_len: usize,
    observers: Vec<Box<dyn SlotObserver>>,
}

impl fmt::Debug for PitchEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PitchEditor")
            .field("formation", &self.formation.name)
            .field("flipped", &self.flipped)
            .field("slots", &self.slots)
            .field("session", &self.session)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl PitchEditor {
    pub fn new(formation: Formation, flipped: bool, min_query_len: usize) -> Self {
        let slots = geometry::project(&formation, flipped);
        Self {
            formation,
            flipped,
            slots,
            session: None,
            generation: 0,
            min_query_len: min_query_len.max(1),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SlotObserver>) {
        self.observers.push(observer);
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> LineupResult<&Slot> {
        self.slots.get(index).ok_or(LineupError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_slots_changed(&self.slots);
        }
    }

    fn check_index(&self, index: usize) -> LineupResult<()> {
        self.slot(index).map(|_| ())
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // --- Formation & flip ---

    /// Replaces every slot with a fresh projection of `formation`. Drags and
    /// bound players are discarded, and an open editor is closed since the
    /// slot it pointed at no longer exists.
    pub fn set_formation(&mut self, formation: Formation) -> Option<SearchEffect> {
        info!(
            "Formation {} -> {} ({} slots)",
            self.formation.name,
            formation.name,
            formation.len()
        );
        self.formation = formation;
        self.reproject()
    }

    /// Re-projects the canonical positions when the flip flag actually
    /// changes. Like a formation change, this drops prior edits.
    pub fn set_flipped(&mut self, flipped: bool) -> Option<SearchEffect> {
        if self.flipped == flipped {
            return None;
        }
        self.flipped = flipped;
        debug!("Flip players: {}", flipped);
        self.reproject()
    }

    fn reproject(&mut self) -> Option<SearchEffect> {
        let effect = self.close_editor();
        self.slots = geometry::project(&self.formation, self.flipped);
        self.notify();
        effect
    }

    /// Restores previously saved slots (e.g. from a snapshot). The count must
    /// match the active formation.
    pub fn load_slots(&mut self, slots: Vec<Slot>) -> LineupResult<()> {
        if slots.len() != self.formation.len() {
            return Err(LineupError::SlotOutOfRange {
                index: slots.len(),
                len: self.formation.len(),
            });
        }
        self.slots = slots
            .into_iter()
            .map(|mut s| {
                s.x = geometry::clamp_to_pitch(s.x);
                s.y = geometry::clamp_to_pitch(s.y);
                s
            })
            .collect();
        self.notify();
        Ok(())
    }

    // --- Drag ---

    /// Drops slot `index` at a pointer position inside `rect`.
    pub fn drag_slot(
        &mut self,
        index: usize,
        rect: &PitchRect,
        client_x: f32,
        client_y: f32,
    ) -> LineupResult<()> {
        let (x, y) = rect.drop_point(client_x, client_y);
        self.place_slot(index, x, y)
    }

    /// Moves slot `index` to percentage coordinates, clamped to the marker band.
    pub fn place_slot(&mut self, index: usize, x: f32, y: f32) -> LineupResult<()> {
        self.check_index(index)?;
        let slot = &mut self.slots[index];
        slot.x = geometry::clamp_to_pitch(x);
        slot.y = geometry::clamp_to_pitch(y);
        debug!("Slot {} ({}) -> ({:.1}, {:.1})", index, slot.role, slot.x, slot.y);
        self.notify();
        Ok(())
    }

    // --- Player editor ---

    pub fn session(&self) -> Option<&EditingSession> {
        self.session.as_ref()
    }

    pub fn modal_mode(&self) -> ModalMode {
        match &self.session {
            None => ModalMode::Closed,
            Some(s) if self.slot(s.target).is_ok_and(Slot::is_bound) => ModalMode::Bound,
            Some(_) => ModalMode::Searching,
        }
    }

    pub fn search_hint(&self) -> Option<SearchHint> {
        self.session.as_ref().map(|s| s.hint(self.min_query_len))
    }

    /// Opens the editor on `index` with an empty query. Replaces any editor
    /// that was already open.
    pub fn open_editor(&mut self, index: usize) -> LineupResult<SearchEffect> {
        self.check_index(index)?;
        let generation = self.next_generation();
        self.session = Some(EditingSession::new(index, generation));
        debug!("Editor opened on slot {} ({:?})", index, self.modal_mode());
        Ok(SearchEffect::Cancel)
    }

    /// Closes the editor, clearing query and results. No-op when closed.
    pub fn close_editor(&mut self) -> Option<SearchEffect> {
        let session = self.session.take()?;
        debug!("Editor closed on slot {}", session.target);
        self.next_generation();
        Some(SearchEffect::Cancel)
    }

    /// A pointer press anywhere on the page; presses outside the modal close it.
    pub fn pointer_down(&mut self, inside_modal: bool) -> Option<SearchEffect> {
        if inside_modal {
            None
        } else {
            self.close_editor()
        }
    }

    /// Records new query text. Short queries clear the results and cancel any
    /// pending request; longer ones are handed out as a ticket to debounce.
    pub fn set_query(&mut self, text: &str) -> LineupResult<SearchEffect> {
        let generation = self.next_generation();
        let min_len = self.min_query_len;
        let session = self.session.as_mut().ok_or(LineupError::NoEditingSession)?;

        session.query = text.to_string();
        session.generation = generation;
        session.is_loading = false;

        if query_len(text) < min_len {
            session.results.clear();
            session.awaiting = false;
            return Ok(SearchEffect::Cancel);
        }

        session.awaiting = true;
        Ok(SearchEffect::Schedule(SearchTicket {
            generation,
            query: text.to_string(),
        }))
    }

    /// Applies a driver event if it belongs to the latest query of the open
    /// editor. Returns whether anything changed.
    pub fn handle_search_event(&mut self, event: SearchEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!("Dropping search event #{}: editor closed", event.generation());
            return false;
        };
        if event.generation() != session.generation {
            debug!(
                "Dropping stale search event #{} (current #{})",
                event.generation(),
                session.generation
            );
            return false;
        }

        match event {
            SearchEvent::Started { .. } => {
                session.is_loading = true;
            }
            SearchEvent::Finished { outcome, .. } => {
                session.is_loading = false;
                session.awaiting = false;
                session.results = match outcome {
                    Ok(players) => players,
                    Err(e) => {
                        warn!("Search failed, showing no results: {}", e);
                        Vec::new()
                    }
                };
            }
        }
        true
    }

    /// Binds the search result at `result_index` to the target slot.
    pub fn select_result(&mut self, result_index: usize) -> LineupResult<SearchEffect> {
        let session = self.session.as_ref().ok_or(LineupError::NoEditingSession)?;
        let player = session
            .results
            .get(result_index)
            .cloned()
            .ok_or(LineupError::NoSuchResult(result_index))?;
        self.bind_player(player)
    }

    /// Binds `player` to the target slot. The editor stays open in bound mode
    /// with its search state cleared.
    pub fn bind_player(&mut self, player: PlayerRecord) -> LineupResult<SearchEffect> {
        let target = self
            .session
            .as_ref()
            .ok_or(LineupError::NoEditingSession)?
            .target;
        self.check_index(target)?;

        let generation = self.next_generation();
        if let Some(session) = self.session.as_mut() {
            session.reset_search();
            session.generation = generation;
        }
        info!("Slot {} bound to {}", target, player.display_name());
        self.slots[target].player = Some(player);
        self.notify();
        Ok(SearchEffect::Cancel)
    }

    /// Removes the bound player from the target slot; the editor returns to
    /// search mode.
    pub fn clear_player(&mut self) -> LineupResult<()> {
        let session = self.session.as_ref().ok_or(LineupError::NoEditingSession)?;
        let target = session.target;
        self.check_index(target)?;
        if self.slots[target].player.take().is_some() {
            debug!("Slot {} cleared", target);
            self.notify();
        }
        Ok(())
    }
}
