use lineup_protocol::{Formation, Slot};
use serde::{Deserialize, Serialize};

/// Markers are kept this far inside the pitch edge (percent).
pub const MARKER_MIN: f32 = 5.0;
pub const MARKER_MAX: f32 = 95.0;

/// The pitch's on-screen bounding rectangle, in whatever units the host's
/// pointer events use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PitchRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Pointer position as a percentage of the pitch, unclamped.
    pub fn to_percent(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        (
            percent_of(client_x - self.left, self.width),
            percent_of(client_y - self.top, self.height),
        )
    }

    /// Where a marker dropped at this pointer position ends up.
    pub fn drop_point(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        let (x, y) = self.to_percent(client_x, client_y);
        (clamp_to_pitch(x), clamp_to_pitch(y))
    }
}

fn percent_of(offset: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        offset / extent * 100.0
    } else {
        f32::NAN
    }
}

/// Clamps a coordinate to the visible marker band. NaN lands on the lower bound.
pub fn clamp_to_pitch(v: f32) -> f32 {
    if v.is_nan() {
        MARKER_MIN
    } else {
        v.clamp(MARKER_MIN, MARKER_MAX)
    }
}

pub fn flip_y(y: f32) -> f32 {
    100.0 - y
}

/// Fresh live slots for a formation: canonical positions, mirrored top to
/// bottom when `flipped`. Never carries over edits.
pub fn project(formation: &Formation, flipped: bool) -> Vec<Slot> {
    formation
        .positions
        .iter()
        .map(|p| {
            let mut slot = Slot::from(p);
            if flipped {
                slot.y = flip_y(slot.y);
            }
            slot
        })
        .collect()
}
