use crate::catalog::{self, SquadSize};
use crate::error::LineupResult;
use crate::lineup::{DisplayOptions, LineupBuilder, SlotRef};
use lineup_protocol::Slot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// A finished lineup as a JSON document ("save & share").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupSnapshot {
    pub squad_size: SquadSize,
    pub formation: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub captain: SlotRef,
    #[serde(default)]
    pub man_of_the_match: SlotRef,
    #[serde(default)]
    pub display: DisplayOptions,
    /// Live slots; empty means "canonical positions of the formation".
    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl LineupSnapshot {
    pub fn capture(lineup: &LineupBuilder) -> Self {
        Self {
            squad_size: lineup.squad_size(),
            formation: lineup.formation().name.clone(),
            title: lineup.title().to_string(),
            subtitle: lineup.subtitle().to_string(),
            captain: lineup.captain(),
            man_of_the_match: lineup.man_of_the_match(),
            display: lineup.display(),
            slots: lineup.editor().slots().to_vec(),
        }
    }

    /// Rebuilds a lineup. Fails on an unknown formation or a slot count that
    /// does not match it.
    pub fn restore(self, min_query_len: usize) -> LineupResult<LineupBuilder> {
        let formation = catalog::find_formation(self.squad_size, &self.formation)?;
        let mut lineup = LineupBuilder::with_formation(self.squad_size, formation, min_query_len);
        lineup.restore(
            self.title,
            self.subtitle,
            self.captain,
            self.man_of_the_match,
            self.display,
        );
        if !self.slots.is_empty() {
            lineup.editor_mut().load_slots(self.slots)?;
        }
        Ok(lineup)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LineupResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> LineupResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path.as_ref(), json)?;
        info!("💾 Lineup saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// Writes `{path}.tmp`, syncs it, then renames over `path`.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> std::io::Result<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents.as_ref())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_overwrites_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let snap: LineupSnapshot =
            serde_json::from_str(r#"{ "squadSize": 7, "formation": "3-2-1" }"#).unwrap();
        assert_eq!(snap.squad_size, SquadSize::Seven);
        assert_eq!(snap.display, DisplayOptions::default());
        assert_eq!(snap.captain, SlotRef::NONE);

        let lineup = snap.restore(3).unwrap();
        assert_eq!(lineup.editor().slots().len(), 7);
    }

    #[test]
    fn test_rejects_bad_squad_size() {
        let res: Result<LineupSnapshot, _> =
            serde_json::from_str(r#"{ "squadSize": 6, "formation": "2-3-1" }"#);
        assert!(res.is_err());
    }
}
