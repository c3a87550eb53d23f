//! Screen-bounded ship movement.
//!
//! Bounds are derived once, at spawn, from a [`ViewportProjector`] (the camera
//! is static), then every tick the ship moves by `axis * speed * dt` and is
//! clamped back inside the rectangle.

use crate::error::{ShipError, ShipResult};
use bevy::prelude::*;

/// Maps normalised viewport coordinates (`(0,0)` bottom-left, `(1,1)`
/// top-right) to world space.
pub trait ViewportProjector {
    fn viewport_to_world(&self, u: f32, v: f32) -> Vec2;
}

/// Orthographic view centred on `center`, `half_extents` world units to each edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraViewport {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl CameraViewport {
    /// Viewport of a camera showing `window_size` logical pixels at
    /// `pixels_per_unit` screen pixels per world unit.
    pub fn from_window(center: Vec2, window_size: Vec2, pixels_per_unit: f32) -> Self {
        Self {
            center,
            half_extents: window_size / (2.0 * pixels_per_unit),
        }
    }
}

impl ViewportProjector for CameraViewport {
    fn viewport_to_world(&self, u: f32, v: f32) -> Vec2 {
        self.center + Vec2::new(u * 2.0 - 1.0, v * 2.0 - 1.0) * self.half_extents
    }
}

/// Inclusive rectangle the ship may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl MovementBounds {
    /// Visible area shrunk by `padding` on every side.
    pub fn from_viewport(projector: &impl ViewportProjector, padding: f32) -> ShipResult<Self> {
        let bottom_left = projector.viewport_to_world(0.0, 0.0);
        let top_right = projector.viewport_to_world(1.0, 1.0);

        let bounds = Self {
            x_min: bottom_left.x + padding,
            x_max: top_right.x - padding,
            y_min: bottom_left.y + padding,
            y_max: top_right.y - padding,
        };
        if bounds.x_min > bounds.x_max {
            return Err(ShipError::DegenerateBounds {
                axis: "x",
                min: bounds.x_min,
                max: bounds.x_max,
            });
        }
        if bounds.y_min > bounds.y_max {
            return Err(ShipError::DegenerateBounds {
                axis: "y",
                min: bounds.y_min,
                max: bounds.y_max,
            });
        }
        Ok(bounds)
    }

    #[inline]
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.x_min, self.x_max),
            position.y.clamp(self.y_min, self.y_max),
        )
    }

    #[inline]
    pub fn contains(&self, position: Vec2) -> bool {
        (self.x_min..=self.x_max).contains(&position.x)
            && (self.y_min..=self.y_max).contains(&position.y)
    }
}

/// One movement step.  Axis components are clamped to `[-1, 1]` first; a
/// non-finite axis counts as no input.
pub fn step(position: Vec2, axis: Vec2, speed: f32, dt: f32, bounds: &MovementBounds) -> Vec2 {
    let axis = if axis.is_finite() {
        axis.clamp(Vec2::NEG_ONE, Vec2::ONE)
    } else {
        Vec2::ZERO
    };
    bounds.clamp(position + axis * speed * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> CameraViewport {
        CameraViewport::from_window(Vec2::ZERO, Vec2::new(640.0, 960.0), 64.0)
    }

    #[test]
    fn camera_viewport_maps_corners() {
        let vp = viewport();
        assert_eq!(vp.viewport_to_world(0.0, 0.0), Vec2::new(-5.0, -7.5));
        assert_eq!(vp.viewport_to_world(1.0, 1.0), Vec2::new(5.0, 7.5));
        assert_eq!(vp.viewport_to_world(0.5, 0.5), Vec2::ZERO);
    }

    #[test]
    fn bounds_apply_padding_on_every_side() {
        let bounds = MovementBounds::from_viewport(&viewport(), 0.75).unwrap();
        assert_eq!(bounds.x_min, -4.25);
        assert_eq!(bounds.x_max, 4.25);
        assert_eq!(bounds.y_min, -6.75);
        assert_eq!(bounds.y_max, 6.75);
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let err = MovementBounds::from_viewport(&viewport(), 6.0).unwrap_err();
        assert!(
            matches!(err, ShipError::DegenerateBounds { axis: "x", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn every_input_stays_inside_bounds() {
        let bounds = MovementBounds::from_viewport(&viewport(), 0.75).unwrap();
        let starts = [
            Vec2::ZERO,
            Vec2::new(bounds.x_max, bounds.y_max),
            Vec2::new(bounds.x_min, bounds.y_min),
        ];
        let axes = [-1.0, -0.5, 0.0, 0.5, 1.0, 3.0, -7.0];
        for start in starts {
            for &ax in &axes {
                for &ay in &axes {
                    for dt in [0.0, 0.016, 0.5, 10.0] {
                        let p = step(start, Vec2::new(ax, ay), 10.0, dt, &bounds);
                        assert!(bounds.contains(p), "{p:?} escaped bounds {bounds:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn free_movement_is_axis_times_speed_times_dt() {
        let bounds = MovementBounds::from_viewport(&viewport(), 0.75).unwrap();
        let p = step(Vec2::ZERO, Vec2::new(1.0, -0.5), 10.0, 0.1, &bounds);
        assert!((p - Vec2::new(1.0, -0.5)).length() < 1e-5, "got {p:?}");
    }

    #[test]
    fn oversized_axis_is_clamped_before_moving() {
        let bounds = MovementBounds::from_viewport(&viewport(), 0.75).unwrap();
        let p = step(Vec2::ZERO, Vec2::new(5.0, 0.0), 10.0, 0.1, &bounds);
        assert!((p.x - 1.0).abs() < 1e-5, "axis 5.0 should act like 1.0, got {p:?}");
    }
}
