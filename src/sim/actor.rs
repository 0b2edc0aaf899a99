//! Actors: everything with a rectangular hitbox that lives on top of the grid
//!
//! All variants share the geometry on [`Actor`] (position, size, speed and the
//! derived edges). Variant-specific state lives in [`ActorBody`], which also
//! decides what happens on each tick.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, ObstacleMap};
use super::vector::Vector;
use crate::consts::*;

/// Actor identity inside a [`Level`](super::Level).
///
/// Ids are handed out by the level that owns the actor, in spawn order. An
/// actor that was never added to a level is [`ActorId::DETACHED`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ActorId(u64);

impl ActorId {
    pub const DETACHED: ActorId = ActorId(0);

    pub(crate) fn new(id: u64) -> Self {
        ActorId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_detached(&self) -> bool {
        *self == Self::DETACHED
    }
}

/// Discriminant reported by [`Actor::kind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Actor,
    Player,
    Fireball,
    Coin,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Actor => "actor",
            ActorKind::Player => "player",
            ActorKind::Fireball => "fireball",
            ActorKind::Coin => "coin",
        }
    }
}

/// What a fireball does when its next step is blocked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireballMotion {
    /// Reverse velocity and bounce back along the same axis
    Bounce,
    /// Teleport back to the spawn point (falling rain)
    Rain { spawn: Vector },
}

/// Fireball state beyond the shared geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub motion: FireballMotion,
}

/// Coin bobbing state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Animation clock in radians
    pub spring: f64,
    pub spring_speed: f64,
    /// Amplitude of the vertical bob
    pub spring_dist: f64,
    /// Hitbox position at spawn, never changes
    pub rest_pos: Vector,
}

impl Coin {
    /// Advance the phase by `spring_speed * dt`
    pub fn update_spring(&mut self, dt: f64) {
        self.spring += self.spring_speed * dt;
    }

    /// Current vertical offset from the rest position
    pub fn spring_vector(&self) -> Vector {
        Vector::new(0.0, self.spring.sin() * self.spring_dist)
    }

    /// Advance the phase and return the resulting position
    pub fn next_position(&mut self, dt: f64) -> Vector {
        self.update_spring(dt);
        self.rest_pos.plus(self.spring_vector())
    }
}

/// Variant-specific data and behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorBody {
    /// Plain hitbox with no motion of its own
    Static,
    /// Moved by the external run loop
    Player,
    Fireball(Fireball),
    Coin(Coin),
}

/// An entity with a rectangular hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub body: ActorBody,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ONE, Vector::ZERO)
    }
}

impl Actor {
    /// Base actor with no behaviour
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Self {
        Self::with_body(pos, size, speed, ActorBody::Static)
    }

    fn with_body(pos: Vector, size: Vector, speed: Vector, body: ActorBody) -> Self {
        Self {
            id: ActorId::DETACHED,
            pos,
            size,
            speed,
            body,
        }
    }

    /// Player hitbox; feet sit on the requested cell
    pub fn player(pos: Vector) -> Self {
        Self::with_body(
            pos.plus(PLAYER_OFFSET),
            PLAYER_SIZE,
            Vector::ZERO,
            ActorBody::Player,
        )
    }

    /// Bouncing 1x1 fireball
    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self::with_body(
            pos,
            FIREBALL_SIZE,
            speed,
            ActorBody::Fireball(Fireball {
                motion: FireballMotion::Bounce,
            }),
        )
    }

    /// Fireball moving right, bouncing off walls
    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, HORIZONTAL_FIREBALL_SPEED)
    }

    /// Fireball moving down, bouncing off walls
    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, VERTICAL_FIREBALL_SPEED)
    }

    /// Falling fireball that restarts from its spawn point when blocked
    pub fn fire_rain(pos: Vector) -> Self {
        Self::with_body(
            pos,
            FIREBALL_SIZE,
            FIRE_RAIN_SPEED,
            ActorBody::Fireball(Fireball {
                motion: FireballMotion::Rain { spawn: pos },
            }),
        )
    }

    /// Coin with a random starting phase drawn from `rng`
    pub fn coin<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Self {
        Self::coin_with_phase(pos, rng.random_range(0.0..TAU))
    }

    /// Coin with an explicit starting phase
    pub fn coin_with_phase(pos: Vector, spring: f64) -> Self {
        let rest_pos = pos.plus(COIN_OFFSET);
        Self::with_body(
            rest_pos,
            COIN_SIZE,
            Vector::ZERO,
            ActorBody::Coin(Coin {
                spring,
                spring_speed: COIN_SPRING_SPEED,
                spring_dist: COIN_SPRING_DIST,
                rest_pos,
            }),
        )
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ActorId) {
        self.id = id;
    }

    /// Same instance: the same value in memory, or the same level-assigned id
    pub fn is_same(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other) || (!self.id.is_detached() && self.id == other.id)
    }

    pub fn kind(&self) -> ActorKind {
        match self.body {
            ActorBody::Static => ActorKind::Actor,
            ActorBody::Player => ActorKind::Player,
            ActorBody::Fireball(_) => ActorKind::Fireball,
            ActorBody::Coin(_) => ActorKind::Coin,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.bounds().left
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.bounds().top
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.bounds().right
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bounds().bottom
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::of(self.pos, self.size)
    }

    /// Strict rectangle overlap with another actor.
    ///
    /// Never true for the same actor, or for an actor with a negative size.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.is_same(other) {
            return false;
        }
        if other.size.x < 0.0 || other.size.y < 0.0 {
            return false;
        }
        self.bounds().overlaps(&other.bounds())
    }

    /// Where a fireball would be after `dt` without obstacles
    pub fn next_position(&self, dt: f64) -> Vector {
        self.pos.plus(self.speed.times(dt))
    }

    /// Fireball response to a blocked step
    pub fn handle_obstacle(&mut self) {
        if let ActorBody::Fireball(fireball) = self.body {
            match fireball.motion {
                FireballMotion::Bounce => self.speed = self.speed.times(-1.0),
                FireballMotion::Rain { spawn } => self.pos = spawn,
            }
        }
    }

    /// Advance this actor by `dt`, reading static obstacles from `obstacles`
    pub fn act(&mut self, dt: f64, obstacles: &impl ObstacleMap) {
        match self.body {
            ActorBody::Static | ActorBody::Player => {}
            ActorBody::Coin(ref mut coin) => {
                self.pos = coin.next_position(dt);
            }
            ActorBody::Fireball(_) => {
                let next = self.next_position(dt);
                if obstacles.obstacle_at(next, self.size).is_some() {
                    self.handle_obstacle();
                } else {
                    self.pos = next;
                }
            }
        }
    }

    /// Coin state, if this is a coin
    pub fn as_coin(&self) -> Option<&Coin> {
        match &self.body {
            ActorBody::Coin(coin) => Some(coin),
            _ => None,
        }
    }
}
