//! Presentation numbers derived from the live drag offset.
//!
//! Nothing here is stored: the view recomputes these on every frame from the
//! controller's current offset.

use crate::gesture::Offset;
use crate::session::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTuning {
    /// Degrees of tilt per unit of horizontal offset
    pub rotation_per_unit: f64,
    /// Horizontal distance over which the card shrinks from 1.0 toward the floor
    pub scale_decay_distance: f64,
    pub scale_floor: f64,
    /// Horizontal distance past which the like/nope badge appears
    pub preview_threshold: f64,
    /// Distance at which the badge reaches full opacity
    pub preview_full_opacity_distance: f64,
    pub preview_max_extra_scale: f64,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            rotation_per_unit: 0.15,
            scale_decay_distance: 500.0,
            scale_floor: 0.85,
            preview_threshold: 30.0,
            preview_full_opacity_distance: 120.0,
            preview_max_extra_scale: 0.3,
        }
    }
}

/// Like/nope badge shown while a drag is heading somewhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentPreview {
    pub direction: Direction,
    /// 0.0..=1.0
    pub opacity: f64,
    /// 1.0..=1.0 + preview_max_extra_scale
    pub scale: f64,
}

pub fn rotation_degrees(offset: Offset, tuning: &ViewTuning) -> f64 {
    offset.x * tuning.rotation_per_unit
}

pub fn card_scale(offset: Offset, tuning: &ViewTuning) -> f64 {
    (1.0 - offset.x.abs() / tuning.scale_decay_distance).max(tuning.scale_floor)
}

pub fn intent_preview(offset: Offset, dragging: bool, tuning: &ViewTuning) -> Option<IntentPreview> {
    if !dragging {
        return None;
    }
    let direction = if offset.x > tuning.preview_threshold {
        Direction::Like
    } else if offset.x < -tuning.preview_threshold {
        Direction::Dislike
    } else {
        return None;
    };
    let distance = offset.x.abs();
    Some(IntentPreview {
        direction,
        opacity: (distance / tuning.preview_full_opacity_distance).min(1.0),
        scale: 1.0 + (distance / tuning.scale_decay_distance).min(tuning.preview_max_extra_scale),
    })
}
