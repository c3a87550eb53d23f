//! Player ship combat core for a vertical 2D shooter.
//!
//! Weapon heat with overheat lockout, three timed buffs (fire-rate, laser-size,
//! triple-shot), the continuous-fire scheduler, and beam spawn geometry, all
//! owned by a single [`player::PlayerShip`] and stepped once per frame.  The
//! [`player::PlayerShipPlugin`] wires it into a Bevy app.

pub mod config;
pub mod constants;
pub mod error;
pub mod player;
