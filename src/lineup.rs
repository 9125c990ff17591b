use crate::catalog::{self, SquadSize};
use crate::error::{LineupError, LineupResult};
use crate::geometry::PitchRect;
use crate::pitch::PitchEditor;
use crate::search::SearchEffect;
use lineup_protocol::{Formation, PlayerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

/// Formation selected on first load.
pub const DEFAULT_FORMATION: &str = "4-4-1-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    pub show_formation_label: bool,
    pub show_club_badge: bool,
    pub show_manager: bool,
    pub flip_vertically: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_formation_label: true,
            show_club_badge: false,
            show_manager: false,
            flip_vertically: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum DisplayToggle {
    FormationLabel,
    ClubBadge,
    Manager,
    Flip,
}

impl DisplayOptions {
    pub fn get(&self, toggle: DisplayToggle) -> bool {
        match toggle {
            DisplayToggle::FormationLabel => self.show_formation_label,
            DisplayToggle::ClubBadge => self.show_club_badge,
            DisplayToggle::Manager => self.show_manager,
            DisplayToggle::Flip => self.flip_vertically,
        }
    }

    fn set(&mut self, toggle: DisplayToggle, on: bool) {
        match toggle {
            DisplayToggle::FormationLabel => self.show_formation_label = on,
            DisplayToggle::ClubBadge => self.show_club_badge = on,
            DisplayToggle::Manager => self.show_manager = on,
            DisplayToggle::Flip => self.flip_vertically = on,
        }
    }
}

/// Reference to a slot by 0-based index, or none.
///
/// Parses `None`, `Player N`, `Slot N` or a bare `N` (all 1-based) and
/// displays as `None` / `Player N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotRef(pub Option<usize>);

impl SlotRef {
    pub const NONE: SlotRef = SlotRef(None);

    pub fn index(index: usize) -> Self {
        Self(Some(index))
    }

    /// The index when it points at one of `len` slots.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        self.0.filter(|&i| i < len)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => write!(f, "None"),
            Some(i) => write!(f, "Player {}", i + 1),
        }
    }
}

impl FromStr for SlotRef {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::NONE);
        }

        let lower = trimmed.to_ascii_lowercase();
        let number = lower
            .strip_prefix("player")
            .or_else(|| lower.strip_prefix("slot"))
            .unwrap_or(&lower)
            .trim();

        match number.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Self(Some(n - 1))),
            _ => Err(LineupError::SlotRef(s.to_string())),
        }
    }
}

/// Everything a user can do to a lineup.
#[derive(Debug, Clone, PartialEq)]
pub enum LineupCommand {
    SetSquadSize(SquadSize),
    SelectFormation(String),
    SetTitle(String),
    SetSubtitle(String),
    SetCaptain(SlotRef),
    SetManOfTheMatch(SlotRef),
    SetDisplay(DisplayToggle, bool),
    ToggleDisplay(DisplayToggle),
    DragSlot {
        index: usize,
        rect: PitchRect,
        client_x: f32,
        client_y: f32,
    },
    OpenEditor(usize),
    CloseEditor,
    PointerDown {
        inside_modal: bool,
    },
    QueryChanged(String),
    SelectResult(usize),
    BindPlayer(PlayerRecord),
    ClearPlayer,
}

/// The top-level lineup form: selections, header text and display toggles,
/// composing the pitch editor.
#[derive(Debug)]
pub struct LineupBuilder {
    squad_size: SquadSize,
    title: String,
    subtitle: String,
    captain: SlotRef,
    man_of_the_match: SlotRef,
    display: DisplayOptions,
    editor: PitchEditor,
}

impl LineupBuilder {
    /// 11-a-side in 4-4-1-1, nothing selected.
    pub fn new(min_query_len: usize) -> Self {
        let size = SquadSize::Eleven;
        let formation = catalog::find_formation(size, DEFAULT_FORMATION)
            .unwrap_or_else(|_| catalog::default_formation(size));
        Self::with_formation(size, formation, min_query_len)
    }

    pub fn with_formation(size: SquadSize, formation: Formation, min_query_len: usize) -> Self {
        let display = DisplayOptions::default();
        Self {
            squad_size: size,
            title: String::new(),
            subtitle: String::new(),
            captain: SlotRef::NONE,
            man_of_the_match: SlotRef::NONE,
            display,
            editor: PitchEditor::new(formation, display.flip_vertically, min_query_len),
        }
    }

    pub fn squad_size(&self) -> SquadSize {
        self.squad_size
    }

    pub fn formation(&self) -> &Formation {
        self.editor.formation()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn captain(&self) -> SlotRef {
        self.captain
    }

    pub fn man_of_the_match(&self) -> SlotRef {
        self.man_of_the_match
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    pub fn editor(&self) -> &PitchEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PitchEditor {
        &mut self.editor
    }

    pub fn is_captain(&self, index: usize) -> bool {
        self.captain.resolve(self.editor.slots().len()) == Some(index)
    }

    pub fn is_man_of_the_match(&self, index: usize) -> bool {
        self.man_of_the_match.resolve(self.editor.slots().len()) == Some(index)
    }

    /// Switches squad size and resets the formation to that size's first
    /// catalog entry. Captain / MOTM references past the new slot count are
    /// cleared.
    pub fn set_squad_size(&mut self, size: SquadSize) -> Option<SearchEffect> {
        if size == self.squad_size {
            return None;
        }
        info!("Squad size {} -> {}", self.squad_size, size);
        self.squad_size = size;

        let players = size.players();
        for (label, slot_ref) in [
            ("captain", &mut self.captain),
            ("man of the match", &mut self.man_of_the_match),
        ] {
            if slot_ref.0.is_some() && slot_ref.resolve(players).is_none() {
                debug!("Clearing {} ({}): past {} slots", label, slot_ref, players);
                *slot_ref = SlotRef::NONE;
            }
        }

        self.editor.set_formation(catalog::default_formation(size))
    }

    pub fn select_formation(&mut self, name: &str) -> LineupResult<Option<SearchEffect>> {
        let formation = catalog::find_formation(self.squad_size, name)?;
        if formation.name == self.editor.formation().name {
            return Ok(None);
        }
        Ok(self.editor.set_formation(formation))
    }

    pub fn set_display(&mut self, toggle: DisplayToggle, on: bool) -> Option<SearchEffect> {
        self.display.set(toggle, on);
        match toggle {
            DisplayToggle::Flip => self.editor.set_flipped(on),
            _ => None,
        }
    }

    /// Applies one command. The returned effect, if any, is for the search
    /// driver.
    pub fn apply(&mut self, command: LineupCommand) -> LineupResult<Option<SearchEffect>> {
        let effect = match command {
            LineupCommand::SetSquadSize(size) => self.set_squad_size(size),
            LineupCommand::SelectFormation(name) => self.select_formation(&name)?,
            LineupCommand::SetTitle(title) => {
                self.title = title;
                None
            }
            LineupCommand::SetSubtitle(subtitle) => {
                self.subtitle = subtitle;
                None
            }
            LineupCommand::SetCaptain(slot_ref) => {
                self.captain = slot_ref;
                None
            }
            LineupCommand::SetManOfTheMatch(slot_ref) => {
                self.man_of_the_match = slot_ref;
                None
            }
            LineupCommand::SetDisplay(toggle, on) => self.set_display(toggle, on),
            LineupCommand::ToggleDisplay(toggle) => {
                let on = !self.display.get(toggle);
                self.set_display(toggle, on)
            }
            LineupCommand::DragSlot {
                index,
                rect,
                client_x,
                client_y,
            } => {
                self.editor.drag_slot(index, &rect, client_x, client_y)?;
                None
            }
            LineupCommand::OpenEditor(index) => Some(self.editor.open_editor(index)?),
            LineupCommand::CloseEditor => self.editor.close_editor(),
            LineupCommand::PointerDown { inside_modal } => self.editor.pointer_down(inside_modal),
            LineupCommand::QueryChanged(text) => Some(self.editor.set_query(&text)?),
            LineupCommand::SelectResult(i) => Some(self.editor.select_result(i)?),
            LineupCommand::BindPlayer(player) => Some(self.editor.bind_player(player)?),
            LineupCommand::ClearPlayer => {
                self.editor.clear_player()?;
                None
            }
        };
        Ok(effect)
    }

    pub(crate) fn restore(
        &mut self,
        title: String,
        subtitle: String,
        captain: SlotRef,
        man_of_the_match: SlotRef,
        display: DisplayOptions,
    ) {
        self.title = title;
        self.subtitle = subtitle;
        self.captain = captain;
        self.man_of_the_match = man_of_the_match;
        self.display = display;
        self.editor.set_flipped(display.flip_vertically);
    }
}

impl Default for LineupBuilder {
    fn default() -> Self {
        Self::new(crate::config::Config::default().min_query_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("None", None)]
    #[case("", None)]
    #[case("Player 3", Some(2))]
    #[case("slot 11", Some(10))]
    #[case("7", Some(6))]
    fn test_slot_ref_parsing(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(input.parse::<SlotRef>().unwrap(), SlotRef(expected));
    }

    #[rstest]
    #[case("Player 0")]
    #[case("captain")]
    #[case("-2")]
    fn test_slot_ref_rejects_garbage(#[case] input: &str) {
        assert!(input.parse::<SlotRef>().is_err());
    }

    #[test]
    fn test_slot_ref_display_round_trips() {
        let r = SlotRef::index(4);
        assert_eq!(r.to_string(), "Player 5");
        assert_eq!(r.to_string().parse::<SlotRef>().unwrap(), r);
        assert_eq!(SlotRef::NONE.to_string(), "None");
    }

    #[test]
    fn test_display_toggle_names() {
        assert_eq!("club-badge".parse::<DisplayToggle>().unwrap(), DisplayToggle::ClubBadge);
        assert_eq!(DisplayToggle::FormationLabel.to_string(), "formation-label");
    }
}
