use crate::error::{LineupError, LineupResult};
use lineup_protocol::{Formation, Position};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Number of players per side. The catalog only knows these three.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum SquadSize {
    #[strum(serialize = "5")]
    Five,
    #[strum(serialize = "7")]
    Seven,
    #[default]
    #[strum(serialize = "11")]
    Eleven,
}

impl SquadSize {
    pub fn players(self) -> usize {
        u8::from(self) as usize
    }
}

impl From<SquadSize> for u8 {
    fn from(size: SquadSize) -> Self {
        match size {
            SquadSize::Five => 5,
            SquadSize::Seven => 7,
            SquadSize::Eleven => 11,
        }
    }
}

impl TryFrom<u8> for SquadSize {
    type Error = LineupError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            5 => Ok(Self::Five),
            7 => Ok(Self::Seven),
            11 => Ok(Self::Eleven),
            other => Err(LineupError::SquadSize(other)),
        }
    }
}

type SlotTable = &'static [(f32, f32, &'static str)];

const FIVE_A_SIDE: &[(&str, SlotTable)] = &[
    (
        "1-2-1-1",
        &[
            (50.0, 90.0, "GK"),
            (30.0, 70.0, "LM"),
            (70.0, 70.0, "RM"),
            (50.0, 50.0, "CM"),
            (50.0, 30.0, "ST"),
        ],
    ),
    (
        "1-2-2",
        &[
            (50.0, 90.0, "GK"),
            (30.0, 60.0, "CB"),
            (70.0, 60.0, "CB"),
            (30.0, 30.0, "CM"),
            (70.0, 30.0, "CM"),
        ],
    ),
    (
        "1-3-1",
        &[
            (50.0, 90.0, "GK"),
            (25.0, 60.0, "CB"),
            (50.0, 60.0, "CB"),
            (75.0, 60.0, "CB"),
            (50.0, 30.0, "CM"),
        ],
    ),
];

const SEVEN_A_SIDE: &[(&str, SlotTable)] = &[
    (
        "2-3-1",
        &[
            (50.0, 90.0, "GK"),
            (30.0, 75.0, "LB"),
            (70.0, 75.0, "RB"),
            (30.0, 55.0, "LM"),
            (50.0, 55.0, "CM"),
            (70.0, 55.0, "RM"),
            (50.0, 35.0, "ST"),
        ],
    ),
    (
        "3-2-1",
        &[
            (50.0, 90.0, "GK"),
            (30.0, 75.0, "CB"),
            (50.0, 75.0, "CB"),
            (70.0, 75.0, "CB"),
            (30.0, 55.0, "CM"),
            (70.0, 55.0, "CM"),
            (50.0, 35.0, "ST"),
        ],
    ),
];

const ELEVEN_A_SIDE: &[(&str, SlotTable)] = &[
    (
        "4-4-2",
        &[
            (50.0, 90.0, "GK"),
            (20.0, 75.0, "LB"),
            (40.0, 75.0, "CB"),
            (60.0, 75.0, "CB"),
            (80.0, 75.0, "RB"),
            (20.0, 55.0, "LM"),
            (40.0, 55.0, "CM"),
            (60.0, 55.0, "CM"),
            (80.0, 55.0, "RM"),
            (35.0, 35.0, "ST"),
            (65.0, 35.0, "ST"),
        ],
    ),
    (
        "4-4-1-1",
        &[
            (50.0, 90.0, "GK"),
            (20.0, 75.0, "LB"),
            (40.0, 75.0, "CB"),
            (60.0, 75.0, "CB"),
            (80.0, 75.0, "RB"),
            (20.0, 55.0, "LM"),
            (40.0, 55.0, "CM"),
            (60.0, 55.0, "CM"),
            (80.0, 55.0, "RM"),
            (50.0, 45.0, "CAM"),
            (50.0, 30.0, "ST"),
        ],
    ),
    (
        "4-3-3",
        &[
            (50.0, 90.0, "GK"),
            (20.0, 75.0, "LB"),
            (40.0, 75.0, "CB"),
            (60.0, 75.0, "CB"),
            (80.0, 75.0, "RB"),
            (30.0, 55.0, "CM"),
            (50.0, 55.0, "CM"),
            (70.0, 55.0, "CM"),
            (20.0, 35.0, "LW"),
            (50.0, 35.0, "CF"),
            (80.0, 35.0, "RW"),
        ],
    ),
    (
        "3-4-2-1",
        &[
            (50.0, 90.0, "GK"),
            (30.0, 75.0, "CB"),
            (50.0, 75.0, "CB"),
            (70.0, 75.0, "CB"),
            (20.0, 55.0, "LM"),
            (40.0, 55.0, "CM"),
            (60.0, 55.0, "CM"),
            (80.0, 55.0, "RM"),
            (30.0, 35.0, "ST"),
            (70.0, 35.0, "ST"),
            (50.0, 30.0, "CAM"),
        ],
    ),
];

fn table(size: SquadSize) -> &'static [(&'static str, SlotTable)] {
    match size {
        SquadSize::Five => FIVE_A_SIDE,
        SquadSize::Seven => SEVEN_A_SIDE,
        SquadSize::Eleven => ELEVEN_A_SIDE,
    }
}

fn build(name: &str, slots: SlotTable) -> Formation {
    Formation {
        name: name.to_string(),
        positions: slots
            .iter()
            .map(|&(x, y, role)| Position {
                x,
                y,
                role: role.to_string(),
            })
            .collect(),
    }
}

/// All formations for a squad size, in display order.
pub fn catalog(size: SquadSize) -> Vec<Formation> {
    table(size)
        .iter()
        .map(|(name, slots)| build(name, slots))
        .collect()
}

pub fn formation_names(size: SquadSize) -> Vec<&'static str> {
    table(size).iter().map(|(name, _)| *name).collect()
}

/// The first catalog entry; what a squad-size change resets to.
pub fn default_formation(size: SquadSize) -> Formation {
    let (name, slots) = table(size)[0];
    build(name, slots)
}

pub fn find_formation(size: SquadSize, name: &str) -> LineupResult<Formation> {
    let wanted = name.trim();
    table(size)
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(wanted))
        .map(|(n, slots)| build(n, slots))
        .ok_or_else(|| LineupError::UnknownFormation {
            size: size.into(),
            name: wanted.to_string(),
        })
}

pub fn all_formations() -> Vec<(SquadSize, Vec<Formation>)> {
    SquadSize::iter().map(|s| (s, catalog(s))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SquadSize::Five, 3)]
    #[case(SquadSize::Seven, 2)]
    #[case(SquadSize::Eleven, 4)]
    fn test_every_formation_fills_the_squad(#[case] size: SquadSize, #[case] count: usize) {
        let formations = catalog(size);
        assert_eq!(formations.len(), count);
        for f in &formations {
            assert_eq!(f.len(), size.players(), "{} has wrong slot count", f.name);
            assert_eq!(f.positions[0].role, "GK");
        }
    }

    #[test]
    fn test_coordinates_are_percentages() {
        for (_, formations) in all_formations() {
            for f in formations {
                for p in &f.positions {
                    assert!((0.0..=100.0).contains(&p.x));
                    assert!((0.0..=100.0).contains(&p.y));
                }
            }
        }
    }

    #[rstest]
    #[case(SquadSize::Five, "1-2-1-1")]
    #[case(SquadSize::Seven, "2-3-1")]
    #[case(SquadSize::Eleven, "4-4-2")]
    fn test_default_is_first_entry(#[case] size: SquadSize, #[case] name: &str) {
        assert_eq!(default_formation(size).name, name);
    }

    #[test]
    fn test_find_unknown_formation() {
        let err = find_formation(SquadSize::Seven, "4-4-2").unwrap_err();
        assert!(matches!(err, LineupError::UnknownFormation { size: 7, .. }));
    }

    #[test]
    fn test_squad_size_parsing() {
        assert_eq!("7".parse::<SquadSize>().unwrap(), SquadSize::Seven);
        assert!("6".parse::<SquadSize>().is_err());
        assert!(SquadSize::try_from(9).is_err());
        assert_eq!(SquadSize::Eleven.to_string(), "11");
    }
}
