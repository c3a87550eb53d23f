//! Projectile geometry for one firing pulse.
//!
//! The planner never spawns anything itself: it returns [`SpawnDescriptor`]s
//! that the projectile spawner turns into entities.

use crate::constants::TRIPLE_SHOT_OFFSETS;
use bevy::prelude::*;

/// Vertical travel direction of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `+1` for up, `-1` for down.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    #[inline]
    pub fn unit(self) -> Vec2 {
        Vec2::new(0.0, self.sign())
    }
}

/// Everything the spawner needs to instantiate one laser beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDescriptor {
    /// Offset from the ship position (world units).
    pub offset: Vec2,
    /// Uniform scale multiplier (laser-size buff magnitude).
    pub scale: f32,
    /// Unit travel direction.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Seconds until the spawner should remove the beam.
    pub lifetime: f32,
}

impl SpawnDescriptor {
    #[inline]
    pub fn world_position(&self, origin: Vec2) -> Vec2 {
        origin + self.offset
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// Fixed per-beam properties shared by every pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub damage: f32,
    pub lifetime: f32,
}

/// Build the beams of one pulse: one centred beam, or three when triple-shot is active.
pub fn plan_pulse(
    triple_shot: bool,
    laser_scale: f32,
    direction: Direction,
    projectile: ProjectileSpec,
) -> Vec<SpawnDescriptor> {
    let beam = |offset: Vec2| SpawnDescriptor {
        offset,
        scale: laser_scale,
        direction: direction.unit(),
        speed: projectile.speed,
        damage: projectile.damage,
        lifetime: projectile.lifetime,
    };

    if triple_shot {
        TRIPLE_SHOT_OFFSETS
            .iter()
            .map(|&(x, y)| beam(Vec2::new(x, y)))
            .collect()
    } else {
        vec![beam(Vec2::ZERO)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ProjectileSpec = ProjectileSpec {
        speed: 10.0,
        damage: 100.0,
        lifetime: 1.0,
    };

    #[test]
    fn single_shot_is_one_centred_beam() {
        let plan = plan_pulse(false, 1.5, Direction::Up, SPEC);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].offset, Vec2::ZERO);
        assert_eq!(plan[0].scale, 1.5);
        assert_eq!(plan[0].velocity(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn triple_shot_spreads_three_beams() {
        let plan = plan_pulse(true, 1.0, Direction::Up, SPEC);
        let offsets: Vec<Vec2> = plan.iter().map(|d| d.offset).collect();
        assert_eq!(
            offsets,
            vec![
                Vec2::new(-0.3, -0.2),
                Vec2::new(0.0, 0.0),
                Vec2::new(0.3, -0.2)
            ]
        );
    }

    #[test]
    fn triple_shot_beams_share_scale_direction_and_damage() {
        let plan = plan_pulse(true, 2.0, Direction::Down, SPEC);
        for d in &plan {
            assert_eq!(d.scale, 2.0);
            assert_eq!(d.direction, Vec2::new(0.0, -1.0));
            assert_eq!(d.damage, 100.0);
            assert_eq!(d.lifetime, 1.0);
        }
    }

    #[test]
    fn world_position_adds_offset_to_ship() {
        let plan = plan_pulse(true, 1.0, Direction::Up, SPEC);
        let pos = plan[0].world_position(Vec2::new(2.0, -3.0));
        assert!((pos - Vec2::new(1.7, -3.2)).length() < 1e-5, "got {pos:?}");
    }
}
