//! Lava Runner - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, grid, level state, parser, tick)
//! - `plans`: JSON level plan decoding
//! - `settings`: Data-driven run configuration
//! - `error`: Crate error type
//!
//! Rendering, input and the real-time run loop live outside this crate; they
//! drive a [`sim::Level`] through `act`/`tick` and read its status.

pub mod error;
pub mod plans;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use plans::{Plan, parse_plans};
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    use crate::sim::Vector;

    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Seconds of grace time the level keeps running after it is won or lost
    pub const FINISH_DELAY: f64 = 1.0;

    /// Player hitbox: feet on the spawn cell, half a cell taller than it
    pub const PLAYER_OFFSET: Vector = Vector::new(0.0, -0.5);
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);

    /// Fireballs occupy exactly one cell
    pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);

    /// Coins are centered in their cell and smaller than it
    pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    /// Bobbing speed (radians per unit time)
    pub const COIN_SPRING_SPEED: f64 = 8.0;
    /// Bobbing amplitude (cells)
    pub const COIN_SPRING_DIST: f64 = 0.07;

    /// Reserved obstacle symbols
    pub const WALL_SYMBOL: char = 'x';
    pub const LAVA_SYMBOL: char = '!';
}
