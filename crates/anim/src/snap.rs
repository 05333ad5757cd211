/// Inputs at or beyond this magnitude snap to a full ±1.
pub const SNAP_FULL_THRESHOLD: f32 = 0.55;

/// Vertical blend value that selects the sprint branch of the blend tree.
pub const SPRINT_SENTINEL: f32 = 2.0;

/// Quantize a continuous axis value onto the blend-tree grid.
///
/// `0 < |x| < 0.55` gives `±0.5`, `|x| >= 0.55` gives `±1`, anything else `0`.
pub fn snap_axis(x: f32) -> f32 {
    if x >= SNAP_FULL_THRESHOLD {
        1.0
    } else if x > 0.0 {
        0.5
    } else if x <= -SNAP_FULL_THRESHOLD {
        -1.0
    } else if x < 0.0 {
        -0.5
    } else {
        0.0
    }
}

/// Snapped `(horizontal, vertical)` targets, with the sprint override.
pub(crate) fn snap_targets(horizontal: f32, vertical: f32, sprinting: bool) -> (f32, f32) {
    if sprinting {
        (horizontal, SPRINT_SENTINEL)
    } else {
        (snap_axis(horizontal), snap_axis(vertical))
    }
}
