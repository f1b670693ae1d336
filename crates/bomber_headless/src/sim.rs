//! Miniature local rules engine.
//!
//! Applies core actions to a mutable arena and advances bomb fuses.
//! Simplifications versus a real game server: no power-ups, no chain
//! detonations (a bomb on a blast ray blocks it and waits for its own
//! fuse), and actions resolve sequentially in session order.

use bomber_core::action::Action;
use bomber_core::arena::{
    Arena, ArenaStatus, Cell, Combatant, CombatantId, Direction, Grid, Position,
};

/// Fuse ticks on a freshly placed bomb.
pub const PLACED_FUSE: u8 = 3;

/// Health removed from a combatant caught in a blast.
pub const BLAST_DAMAGE: u8 = 50;

/// Blast reach along each cardinal ray.
pub const BLAST_RADIUS: u32 = 2;

/// Arena generation parameters for demo matches.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Number of combatants, spawned clockwise from the corners (max 4).
    pub bots: u32,
    /// Seed for box placement.
    pub seed: u64,
    /// Chance in percent that an eligible interior cell holds a box.
    pub box_percent: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 13,
            height: 11,
            bots: 2,
            seed: 12345,
            box_percent: 30,
        }
    }
}

impl ArenaConfig {
    /// Set the generation seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Simple deterministic RNG for arena generation.
struct SimRng {
    state: u64,
}

impl SimRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5DEE_CE66D).wrapping_add(11);
        self.state
    }

    fn percent(&mut self) -> u64 {
        self.next() % 100
    }
}

/// Generate a classic lattice arena: bordered, pillars on even
/// coordinates, random boxes away from the spawn corners.
///
/// # Panics
///
/// Panics if the configured dimensions are below 5x5 or more than four
/// bots are requested.
#[must_use]
pub fn generate_arena(config: &ArenaConfig) -> Arena {
    assert!(
        config.width >= 5 && config.height >= 5,
        "demo arena must be at least 5x5"
    );
    assert!(config.bots <= 4, "demo arena supports at most 4 bots");

    let mut grid = Grid::new(config.width, config.height).expect("dimensions checked above");
    let (w, h) = (config.width as i32, config.height as i32);

    for x in 0..w {
        grid.set_cell(Position::new(x, 0), Cell::Wall);
        grid.set_cell(Position::new(x, h - 1), Cell::Wall);
    }
    for y in 0..h {
        grid.set_cell(Position::new(0, y), Cell::Wall);
        grid.set_cell(Position::new(w - 1, y), Cell::Wall);
    }
    for y in (2..h - 1).step_by(2) {
        for x in (2..w - 1).step_by(2) {
            grid.set_cell(Position::new(x, y), Cell::Wall);
        }
    }

    let spawns = [
        Position::new(1, 1),
        Position::new(w - 2, h - 2),
        Position::new(w - 2, 1),
        Position::new(1, h - 2),
    ];

    // Keep each spawn and its approaches clear so nobody starts walled in.
    let near_spawn = |pos: Position| {
        spawns
            .iter()
            .take(config.bots.max(1) as usize)
            .any(|&s| pos.manhattan_distance(s) <= 2)
    };

    let mut rng = SimRng::new(config.seed);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let pos = Position::new(x, y);
            if grid.cell(pos) == Some(Cell::Empty)
                && !near_spawn(pos)
                && rng.percent() < config.box_percent
            {
                grid.set_cell(pos, Cell::Box);
            }
        }
    }

    let combatants = (0..config.bots)
        .map(|i| Combatant {
            position: spawns[i as usize],
            health: 100,
            id: CombatantId::new(format!("bot-{}", i + 1)),
            facing: Direction::Down,
        })
        .collect();

    Arena {
        id: config.seed,
        grid,
        combatants,
        status: ArenaStatus::Active,
        tick: 0,
    }
}

/// A mutable arena plus the rules to advance it.
#[derive(Debug, Clone)]
pub struct LocalArena {
    arena: Arena,
}

impl LocalArena {
    /// Wrap an arena snapshot as the live match state.
    #[must_use]
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }

    /// Read access for sessions and rendering.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Apply one combatant's action. Unknown or eliminated combatants are
    /// ignored, and moves clamp at the first blocked or occupied cell.
    pub fn apply(&mut self, id: &CombatantId, action: Action) {
        let Some(index) = self
            .arena
            .combatants
            .iter()
            .position(|c| &c.id == id && c.is_alive())
        else {
            return;
        };

        match action {
            Action::Wait => {}
            Action::Move { direction, steps } => {
                let mut pos = self.arena.combatants[index].position;
                for _ in 0..steps {
                    let next = pos.step(direction);
                    if !self.arena.is_walkable(next) || self.arena.is_occupied(next) {
                        break;
                    }
                    pos = next;
                }
                let combatant = &mut self.arena.combatants[index];
                combatant.position = pos;
                combatant.facing = direction;
            }
            Action::PlaceBomb => {
                let pos = self.arena.combatants[index].position;
                if self.arena.grid.cell(pos) == Some(Cell::Empty) {
                    self.arena
                        .grid
                        .set_cell(pos, Cell::Bomb { timer: PLACED_FUSE });
                }
            }
        }
    }

    /// Advance one tick: burn fuses, resolve detonations, settle the
    /// match status.
    pub fn tick(&mut self) {
        let mut detonations = Vec::new();
        let (w, h) = (
            self.arena.grid.width() as i32,
            self.arena.grid.height() as i32,
        );
        for y in 0..h {
            for x in 0..w {
                let pos = Position::new(x, y);
                if let Some(Cell::Bomb { timer }) = self.arena.grid.cell(pos) {
                    if timer == 0 {
                        detonations.push(pos);
                    } else {
                        self.arena.grid.set_cell(pos, Cell::Bomb { timer: timer - 1 });
                    }
                }
            }
        }

        for pos in detonations {
            self.detonate(pos);
        }

        let living: Vec<CombatantId> = self
            .arena
            .living_combatants()
            .map(|c| c.id.clone())
            .collect();
        if self.arena.status == ArenaStatus::Active && living.len() <= 1 {
            self.arena.status = ArenaStatus::Ended {
                winner: living.into_iter().next(),
            };
        }

        self.arena.tick += 1;
    }

    /// Resolve one bomb: clear it, damage the blast cells, destroy boxes.
    fn detonate(&mut self, bomb_pos: Position) {
        tracing::debug!(?bomb_pos, "bomb detonates");
        self.arena.grid.set_cell(bomb_pos, Cell::Empty);
        self.damage_at(bomb_pos);

        for direction in Direction::ALL {
            let mut probe = bomb_pos;
            for _ in 0..BLAST_RADIUS {
                probe = probe.step(direction);
                match self.arena.grid.cell(probe) {
                    None | Some(Cell::Wall | Cell::Bomb { .. }) => break,
                    Some(Cell::Box) => {
                        self.arena.grid.set_cell(probe, Cell::Empty);
                        break;
                    }
                    Some(Cell::Empty) => self.damage_at(probe),
                }
            }
        }
    }

    fn damage_at(&mut self, pos: Position) {
        for combatant in &mut self.arena.combatants {
            if combatant.is_alive() && combatant.position == pos {
                combatant.health = combatant.health.saturating_sub(BLAST_DAMAGE);
                tracing::debug!(
                    agent = %combatant.id,
                    health = combatant.health,
                    "caught in blast"
                );
            }
        }
    }
}
