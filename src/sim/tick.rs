//! Reference simulation step
//!
//! One call advances every actor, then resolves what the player touches.
//! Touches are collected against the post-motion actor set first and applied
//! afterwards, so the actor list is never modified while it is iterated.

use serde::{Deserialize, Serialize};

use super::actor::{ActorId, ActorKind};
use super::collision::ObstacleMap;
use super::grid::Obstacle;
use super::state::{Level, LevelStatus, Touched};
use crate::error::SimResult;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    CoinCollected(ActorId),
    /// Last coin collected
    Won,
    /// Player touched lava or a fireball
    Lost(Touched),
}

/// Advance `level` by `dt`
pub fn tick(level: &mut Level, dt: f64) -> SimResult<Vec<LevelEvent>> {
    let mut events = Vec::new();

    level.act_actors(dt);

    if level.status() == LevelStatus::Running {
        let touches = collect_touches(level);
        for (touched, actor) in touches {
            let was_coin = matches!(touched, Touched::Actor(ActorKind::Coin));
            level.player_touched(touched, actor)?;

            if let (true, Some(id)) = (was_coin, actor) {
                events.push(LevelEvent::CoinCollected(id));
            }
            match level.status() {
                LevelStatus::Running => {}
                LevelStatus::Won => {
                    events.push(LevelEvent::Won);
                    break;
                }
                LevelStatus::Lost => {
                    events.push(LevelEvent::Lost(touched));
                    break;
                }
            }
        }
    }

    level.tick_finish_delay(dt);
    Ok(events)
}

/// Everything the player currently touches: lava under its hitbox first,
/// then the first overlapping actor
fn collect_touches(level: &Level) -> Vec<(Touched, Option<ActorId>)> {
    let Some(player) = level.player() else {
        return Vec::new();
    };

    let mut touches = Vec::new();
    if let Some(Obstacle::Lava) = level.obstacle_at(player.pos, player.size) {
        touches.push((Touched::Obstacle(Obstacle::Lava), None));
    }
    if let Some(other) = level.actor_at(player) {
        touches.push((Touched::Actor(other.kind()), Some(other.id())));
    }
    touches
}
