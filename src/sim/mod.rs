//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time deltas only
//! - Seeded RNG only
//! - Stable iteration order (actor spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod grid;
pub mod parser;
pub mod state;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorBody, ActorId, ActorKind, Coin, Fireball, FireballMotion};
pub use collision::{Bounds, CellSpan, ObstacleMap};
pub use grid::{Grid, Obstacle};
pub use parser::{ActorFactory, LevelParser, Spawn, SymbolTable};
pub use state::{Level, LevelStatus, Touched};
pub use tick::{LevelEvent, tick};
pub use vector::Vector;
