//! Level state: obstacle grid, live actors and the win/lose status machine

use log::debug;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::collision::ObstacleMap;
use super::grid::{Grid, Obstacle};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::{SimError, SimResult};

/// Outcome of a level. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    #[default]
    Running,
    Won,
    Lost,
}

/// Something the player ran into: a grid cell or another actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touched {
    Obstacle(Obstacle),
    Actor(ActorKind),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<ActorKind> for Touched {
    fn from(kind: ActorKind) -> Self {
        Touched::Actor(kind)
    }
}

impl Touched {
    pub fn as_str(&self) -> &'static str {
        match self {
            Touched::Obstacle(obstacle) => obstacle.as_str(),
            Touched::Actor(kind) => kind.as_str(),
        }
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    /// Live actors in spawn order
    actors: Vec<Actor>,
    /// First actor of kind `player`
    player: Option<ActorId>,
    status: LevelStatus,
    /// Countdown started once the level resolves; finished when negative
    pub finish_delay: f64,
    /// Next actor ID
    next_id: u64,
}

impl Level {
    /// Build a level; every actor gets a fresh id in spawn order, replacing
    /// whatever id it carried before.
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let mut level = Self {
            grid,
            actors: Vec::with_capacity(actors.len()),
            player: None,
            status: LevelStatus::Running,
            finish_delay: FINISH_DELAY,
            next_id: 1,
        };
        for actor in actors {
            level.add_actor(actor);
        }
        level
    }

    /// Allocate a new actor ID
    fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an actor with a fresh id. The first player added becomes the
    /// level's player.
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = self.next_actor_id();
        actor.set_id(id);
        if self.player.is_none() && actor.kind() == ActorKind::Player {
            self.player = Some(id);
        }
        self.actors.push(actor);
        id
    }

    /// Override the grace period after the level resolves
    pub fn with_finish_delay(mut self, finish_delay: f64) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    /// Mutable player access for the external input loop
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    /// True once the level resolved and the finish delay ran out
    pub fn is_finished(&self) -> bool {
        self.status != LevelStatus::Running && self.finish_delay < 0.0
    }

    /// First actor (in spawn order) overlapping `other`, never `other` itself
    pub fn actor_at(&self, other: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|a| a.is_intersect(other))
    }

    /// Remove an actor by identity; unknown ids are ignored
    pub fn remove_actor(&mut self, id: ActorId) {
        self.actors.retain(|a| a.id() != id);
    }

    /// True when no live actor has `kind`
    pub fn no_more_actors(&self, kind: ActorKind) -> bool {
        !self.actors.iter().any(|a| a.kind() == kind)
    }

    /// Apply the effect of the player touching something.
    ///
    /// Lava and fireballs lose the level; collecting the last coin wins it.
    /// Does nothing once the level has resolved. A coin touch requires the
    /// coin's id.
    pub fn player_touched(
        &mut self,
        touched: impl Into<Touched>,
        actor: Option<ActorId>,
    ) -> SimResult<()> {
        if self.status != LevelStatus::Running {
            return Ok(());
        }

        match touched.into() {
            Touched::Obstacle(Obstacle::Lava) | Touched::Actor(ActorKind::Fireball) => {
                debug!("level lost");
                self.status = LevelStatus::Lost;
            }
            Touched::Actor(ActorKind::Coin) => {
                let id = actor.ok_or(SimError::MissingArgument("coin actor"))?;
                self.remove_actor(id);
                debug!("coin {} collected", id.get());
                if self.no_more_actors(ActorKind::Coin) {
                    debug!("level won");
                    self.status = LevelStatus::Won;
                }
            }
            Touched::Obstacle(Obstacle::Wall)
            | Touched::Actor(ActorKind::Actor | ActorKind::Player) => {}
        }
        Ok(())
    }

    /// Run every actor's motion rule for one step.
    ///
    /// Actors only read the grid, so the actor set is never resized while
    /// this pass runs.
    pub fn act_actors(&mut self, dt: f64) {
        let grid = &self.grid;
        for actor in &mut self.actors {
            actor.act(dt, grid);
        }
    }

    /// Count down the finish delay once the level resolved
    pub fn tick_finish_delay(&mut self, dt: f64) {
        if self.status != LevelStatus::Running {
            self.finish_delay -= dt;
        }
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }
}
