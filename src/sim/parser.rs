//! Text plan to [`Level`] translation
//!
//! A plan is a list of lines; `x` is a wall, `!` is lava, and any other
//! character may be mapped to an actor factory through a [`SymbolTable`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::grid::{Grid, Obstacle};
use super::state::Level;
use super::vector::Vector;
use crate::consts::{LAVA_SYMBOL, WALL_SYMBOL};
use crate::error::{SimError, SimResult};

/// Builds an actor at a grid coordinate. The RNG is the parser's seeded stream.
pub type ActorFactory = Arc<dyn Fn(Vector, &mut Pcg32) -> Actor + Send + Sync>;

/// Built-in actor variants, nameable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spawn {
    Player,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
    Coin,
}

impl Spawn {
    pub fn factory(self) -> ActorFactory {
        let build: fn(Vector, &mut Pcg32) -> Actor = match self {
            Spawn::Player => |pos, _| Actor::player(pos),
            Spawn::HorizontalFireball => |pos, _| Actor::horizontal_fireball(pos),
            Spawn::VerticalFireball => |pos, _| Actor::vertical_fireball(pos),
            Spawn::FireRain => |pos, _| Actor::fire_rain(pos),
            Spawn::Coin => |pos, rng| Actor::coin(pos, rng),
        };
        Arc::new(build)
    }
}

/// Character to actor factory mapping
#[derive(Clone, Default)]
pub struct SymbolTable {
    factories: BTreeMap<char, ActorFactory>,
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `=` and `|` fireballs, `v` fire rain, `o` coin
    pub fn standard() -> Self {
        let legend = [
            ('@', Spawn::Player),
            ('=', Spawn::HorizontalFireball),
            ('|', Spawn::VerticalFireball),
            ('v', Spawn::FireRain),
            ('o', Spawn::Coin),
        ];
        Self::from_legend(legend)
    }

    /// Table built from named built-in variants. Reserved symbols are skipped
    /// with a warning.
    pub fn from_legend(legend: impl IntoIterator<Item = (char, Spawn)>) -> Self {
        let mut table = Self::new();
        for (symbol, spawn) in legend {
            if let Err(err) = table.register(symbol, spawn.factory()) {
                log::warn!("ignoring legend entry {symbol:?} => {spawn:?}: {err}");
            }
        }
        table
    }

    /// Map `symbol` to `factory`, replacing any previous mapping.
    ///
    /// The factory is tried once at the origin; it must produce an actor
    /// with a finite position and size.
    pub fn register(&mut self, symbol: char, factory: ActorFactory) -> SimResult<()> {
        if symbol == WALL_SYMBOL || symbol == LAVA_SYMBOL {
            return Err(SimError::ReservedSymbol(symbol));
        }

        let sample = factory(Vector::ZERO, &mut Pcg32::seed_from_u64(0));
        if !sample.pos.is_finite() || !sample.size.is_finite() {
            return Err(SimError::TypeMismatch {
                expected: "actor with finite geometry",
                found: format!("pos {:?}, size {:?}", sample.pos, sample.size),
            });
        }

        self.factories.insert(symbol, factory);
        Ok(())
    }

    pub fn get(&self, symbol: char) -> Option<&ActorFactory> {
        self.factories.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Turns plans into levels using a snapshot of a symbol table
pub struct LevelParser {
    symbols: SymbolTable,
    rng: Pcg32,
}

impl LevelParser {
    /// The table is copied; later edits to `symbols` do not reach this parser.
    pub fn new(symbols: &SymbolTable) -> Self {
        Self::with_seed(symbols, 0)
    }

    /// Parser whose coin phases come from `seed`
    pub fn with_seed(symbols: &SymbolTable, seed: u64) -> Self {
        Self {
            symbols: symbols.clone(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<&ActorFactory> {
        self.symbols.get(symbol)
    }

    pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            WALL_SYMBOL => Some(Obstacle::Wall),
            LAVA_SYMBOL => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, lines: &[S]) -> Grid {
        Grid::new(
            lines
                .iter()
                .map(|line| line.as_ref().chars().map(Self::obstacle_from_symbol).collect())
                .collect(),
        )
    }

    /// Actors in row-major order of their symbols
    pub fn create_actors<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (y, line) in lines.iter().enumerate() {
            for (x, symbol) in line.as_ref().chars().enumerate() {
                if let Some(factory) = self.symbols.get(symbol) {
                    actors.push(factory(Vector::new(x as f64, y as f64), &mut self.rng));
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&mut self, lines: &[S]) -> Level {
        let grid = self.create_grid(lines);
        let actors = self.create_actors(lines);
        log::debug!(
            "parsed {}x{} level with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Level::new(grid, actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ActorKind;

    #[test]
    fn test_obstacle_symbols() {
        assert_eq!(LevelParser::obstacle_from_symbol('x'), Some(Obstacle::Wall));
        assert_eq!(LevelParser::obstacle_from_symbol('!'), Some(Obstacle::Lava));
        assert_eq!(LevelParser::obstacle_from_symbol(' '), None);
        assert_eq!(LevelParser::obstacle_from_symbol('o'), None);
    }

    #[test]
    fn test_grid_and_player_from_plan() {
        let mut symbols = SymbolTable::new();
        symbols.register('@', Spawn::Player.factory()).unwrap();
        let mut parser = LevelParser::new(&symbols);
        let plan = [" @ ", "x!x"];

        let grid = parser.create_grid(&plan);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows()[0], vec![None, None, None]);
        assert_eq!(
            grid.rows()[1],
            vec![Some(Obstacle::Wall), Some(Obstacle::Lava), Some(Obstacle::Wall)]
        );

        let actors = parser.create_actors(&plan);
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].kind(), ActorKind::Player);
        // Spawned at grid (1, 0), hitbox raised by half a cell
        assert_eq!(actors[0].pos, Vector::new(1.0, -0.5));
    }

    #[test]
    fn test_unmapped_symbols_spawn_nothing() {
        let parser = LevelParser::new(&SymbolTable::new());
        assert!(parser.actor_from_symbol('@').is_none());
        let mut parser = parser;
        assert!(parser.create_actors(&["@o=|v"]).is_empty());
    }

    #[test]
    fn test_actor_order_is_row_major() {
        let mut parser = LevelParser::new(&SymbolTable::standard());
        let actors = parser.create_actors(&["o  =", "@ | ", "v   "]);
        let kinds: Vec<_> = actors.iter().map(Actor::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActorKind::Coin,
                ActorKind::Fireball,
                ActorKind::Player,
                ActorKind::Fireball,
                ActorKind::Fireball,
            ]
        );
        assert_eq!(actors[1].pos, Vector::new(3.0, 0.0));
        assert_eq!(actors[3].speed, Vector::new(0.0, 2.0));
        assert_eq!(actors[4].speed, Vector::new(0.0, 3.0));
    }

    #[test]
    fn test_parser_keeps_snapshot_of_table() {
        let mut symbols = SymbolTable::new();
        symbols.register('@', Spawn::Player.factory()).unwrap();
        let mut parser = LevelParser::new(&symbols);
        symbols.register('o', Spawn::Coin.factory()).unwrap();
        assert_eq!(symbols.len(), 2);

        assert!(parser.actor_from_symbol('o').is_none());
        assert_eq!(parser.create_actors(&["@o"]).len(), 1);
    }

    #[test]
    fn test_reserved_symbols_rejected() {
        let mut symbols = SymbolTable::new();
        let err = symbols.register('x', Spawn::Coin.factory()).unwrap_err();
        assert!(matches!(err, SimError::ReservedSymbol('x')));
        let err = symbols.register('!', Spawn::Coin.factory()).unwrap_err();
        assert!(matches!(err, SimError::ReservedSymbol('!')));
        assert!(symbols.is_empty());

        let table = SymbolTable::from_legend([('x', Spawn::Player), ('@', Spawn::Player)]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_broken_factory_rejected() {
        let mut symbols = SymbolTable::new();
        let err = symbols
            .register(
                '?',
                Arc::new(|_: Vector, _: &mut Pcg32| {
                    Actor::new(Vector::new(f64::NAN, 0.0), Vector::ONE, Vector::ZERO)
                }),
            )
            .unwrap_err();
        assert!(matches!(err, SimError::TypeMismatch { .. }));
        assert!(symbols.get('?').is_none());
    }

    #[test]
    fn test_custom_factory() {
        let mut symbols = SymbolTable::standard();
        symbols
            .register(
                '#',
                Arc::new(|pos: Vector, _: &mut Pcg32| {
                    Actor::new(pos, Vector::new(2.0, 2.0), Vector::ZERO)
                }),
            )
            .unwrap();
        let mut parser = LevelParser::new(&symbols);
        let level = parser.parse(&["  #"]);
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].kind(), ActorKind::Actor);
        assert_eq!(level.actors()[0].size, Vector::new(2.0, 2.0));
    }

    #[test]
    fn test_parse_builds_level() {
        let mut parser = LevelParser::with_seed(&SymbolTable::standard(), 42);
        let plan = ["     ", " @ o ", "xxxxx!"];
        let level = parser.parse(&plan);
        assert_eq!(level.width(), 6);
        assert_eq!(level.height(), 3);
        assert_eq!(level.actors().len(), 2);
        assert!(level.player().is_some());
        assert!(!level.no_more_actors(ActorKind::Coin));
    }

    #[test]
    fn test_same_seed_same_level() {
        let plan = ["o o o"];
        let a = LevelParser::with_seed(&SymbolTable::standard(), 9).parse(&plan);
        let b = LevelParser::with_seed(&SymbolTable::standard(), 9).parse(&plan);
        let phases = |l: &Level| -> Vec<f64> {
            l.actors().iter().filter_map(|a| a.as_coin()).map(|c| c.spring).collect()
        };
        assert_eq!(phases(&a), phases(&b));
    }
}
