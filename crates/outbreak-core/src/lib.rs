//! Core state for the outbreak pursuit simulation: world configuration,
//! breadth-first distance fields, and the per-tick flee/chase movement rules.

use outbreak_grid::{Cell, CellState, Frontier, GridError, OccupancyGrid};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised when constructing or mutating the simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid position {cell}: {reason}")]
    InvalidPosition { cell: Cell, reason: &'static str },
    #[error("requested {requested} spawn cells but only {available} are free")]
    InsufficientSpace { requested: usize, available: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// The two entity populations tracked by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Human,
    Zombie,
}

/// Static configuration for an outbreak world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutbreakConfig {
    /// Grid height in rows.
    pub grid_height: u32,
    /// Grid width in columns.
    pub grid_width: u32,
    /// Optional RNG seed for reproducible random population.
    pub rng_seed: Option<u64>,
    /// Maximum number of tick summaries retained in memory.
    pub history_capacity: usize,
}

impl Default for OutbreakConfig {
    fn default() -> Self {
        Self {
            grid_height: 30,
            grid_width: 40,
            rng_seed: None,
            history_capacity: 256,
        }
    }
}

impl OutbreakConfig {
    fn validate(&self) -> Result<(), SimulationError> {
        if self.grid_height == 0 || self.grid_width == 0 {
            return Err(SimulationError::InvalidConfig(
                "grid dimensions must be non-zero",
            ));
        }
        if self.history_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "history capacity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Build the world RNG, honouring `rng_seed` when provided.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

/// High level simulation clock (ticks processed since construction).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Resets the tick counter back to zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Population summary recorded after each processed tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: Tick,
    pub humans: usize,
    pub zombies: usize,
    pub humans_moved: usize,
    pub zombies_moved: usize,
}

/// Shortest 4-way path lengths from every entity of one population.
///
/// Cells no path reaches, obstacles included, hold the sentinel value: the
/// total cell count of the grid, strictly greater than any simple path
/// length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistanceField {
    height: u32,
    width: u32,
    sentinel: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Field with every cell at the sentinel, before any seeding.
    fn unreached(height: u32, width: u32) -> Self {
        let sentinel = height * width;
        Self {
            height,
            width,
            sentinel,
            distances: vec![sentinel; (height as usize) * (width as usize)],
        }
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The unreachable marker held by cells no seed can reach.
    #[must_use]
    pub const fn sentinel(&self) -> u32 {
        self.sentinel
    }

    /// Returns the flat index for `(row, col)` without bounds checks.
    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + (col as usize)
    }

    /// Distance stored at `cell`, or `None` outside the field.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<u32> {
        if cell.row < self.height && cell.col < self.width {
            Some(self.distances[self.offset(cell.row, cell.col)])
        } else {
            None
        }
    }

    /// Whether any seed reaches `cell`.
    #[must_use]
    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|d| d < self.sentinel)
    }

    /// Flat row-major view of the distances.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.distances
    }

    /// Row slices from the top of the grid down.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.distances.chunks(self.width as usize)
    }

    /// Distance at an in-bounds `cell`; callers guarantee the bounds.
    fn at(&self, cell: Cell) -> u32 {
        self.distances[self.offset(cell.row, cell.col)]
    }

    fn seed_zero(&mut self, cell: Cell) {
        let idx = self.offset(cell.row, cell.col);
        self.distances[idx] = 0;
    }

    /// Lower `cell` toward `candidate`, keeping the smaller distance.
    ///
    /// Visited marking already guarantees each cell is written once, so the
    /// `min` is conservative rather than load-bearing; it stays so the update
    /// is insensitive to expansion order.
    fn relax(&mut self, cell: Cell, candidate: u32) {
        let idx = self.offset(cell.row, cell.col);
        self.distances[idx] = self.distances[idx].min(candidate);
    }
}

/// Aggregate simulation state: the obstacle grid plus both entity rosters.
///
/// Entities are not obstacles. Any number of humans and zombies may stack on
/// one cell, and movement never treats an occupied cell as blocked; only
/// `Full` grid cells impede travel.
#[derive(Clone)]
pub struct Apocalypse {
    config: OutbreakConfig,
    grid: OccupancyGrid,
    humans: Vec<Cell>,
    zombies: Vec<Cell>,
    tick: Tick,
    rng: SmallRng,
    history: VecDeque<TickSummary>,
}

impl fmt::Debug for Apocalypse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Apocalypse")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("humans", &self.humans.len())
            .field("zombies", &self.zombies.len())
            .finish()
    }
}

impl Apocalypse {
    /// Instantiate an empty world from the supplied configuration.
    pub fn new(config: OutbreakConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = OccupancyGrid::new(config.grid_height, config.grid_width)?;
        let rng = config.seeded_rng();
        let history = VecDeque::with_capacity(config.history_capacity);
        debug!(
            height = config.grid_height,
            width = config.grid_width,
            "created outbreak world"
        );
        Ok(Self {
            config,
            grid,
            humans: Vec::new(),
            zombies: Vec::new(),
            tick: Tick::zero(),
            rng,
            history,
        })
    }

    /// Build a world and place obstacles and entities in one call, failing on
    /// the first invalid position without keeping any partial placement
    /// visible to the caller.
    pub fn with_entities(
        config: OutbreakConfig,
        obstacles: &[Cell],
        zombies: &[Cell],
        humans: &[Cell],
    ) -> Result<Self, SimulationError> {
        let mut world = Self::new(config)?;
        for &cell in obstacles {
            world.add_obstacle(cell)?;
        }
        for &cell in zombies {
            world.add_zombie(cell)?;
        }
        for &cell in humans {
            world.add_human(cell)?;
        }
        Ok(world)
    }

    #[must_use]
    pub fn config(&self) -> &OutbreakConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    #[must_use]
    pub fn num_humans(&self) -> usize {
        self.humans.len()
    }

    #[must_use]
    pub fn num_zombies(&self) -> usize {
        self.zombies.len()
    }

    /// Humans in insertion order.
    pub fn humans(&self) -> impl Iterator<Item = Cell> + '_ {
        self.humans.iter().copied()
    }

    /// Zombies in insertion order.
    pub fn zombies(&self) -> impl Iterator<Item = Cell> + '_ {
        self.zombies.iter().copied()
    }

    /// Retained tick summaries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TickSummary> + '_ {
        self.history.iter()
    }

    /// Summary of the most recently processed tick, if any.
    #[must_use]
    pub fn latest_summary(&self) -> Option<&TickSummary> {
        self.history.back()
    }

    /// Mark `cell` as an obstacle. Cells hosting an entity are rejected so
    /// rosters never overlap a `Full` cell.
    pub fn add_obstacle(&mut self, cell: Cell) -> Result<(), SimulationError> {
        if self.humans.contains(&cell) || self.zombies.contains(&cell) {
            return Err(SimulationError::InvalidPosition {
                cell,
                reason: "cell hosts an entity",
            });
        }
        self.grid.set_full(cell)?;
        Ok(())
    }

    /// Append a human at `cell`.
    pub fn add_human(&mut self, cell: Cell) -> Result<(), SimulationError> {
        self.validate_spawn(cell)?;
        self.humans.push(cell);
        Ok(())
    }

    /// Append a zombie at `cell`.
    pub fn add_zombie(&mut self, cell: Cell) -> Result<(), SimulationError> {
        self.validate_spawn(cell)?;
        self.zombies.push(cell);
        Ok(())
    }

    fn validate_spawn(&self, cell: Cell) -> Result<(), SimulationError> {
        match self.grid.state(cell) {
            Some(CellState::Empty) => Ok(()),
            Some(CellState::Full) => Err(SimulationError::InvalidPosition {
                cell,
                reason: "cell is an obstacle",
            }),
            None => Err(SimulationError::InvalidPosition {
                cell,
                reason: "cell lies outside the grid",
            }),
        }
    }

    /// Reset the world: all obstacles removed, both rosters emptied, the
    /// clock and history restarted. The configuration and RNG are retained.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.humans.clear();
        self.zombies.clear();
        self.tick = Tick::zero();
        self.history.clear();
        debug!("cleared outbreak world");
    }

    fn roster(&self, kind: EntityKind) -> &[Cell] {
        match kind {
            EntityKind::Human => &self.humans,
            EntityKind::Zombie => &self.zombies,
        }
    }

    fn roster_mut(&mut self, kind: EntityKind) -> &mut Vec<Cell> {
        match kind {
            EntityKind::Human => &mut self.humans,
            EntityKind::Zombie => &mut self.zombies,
        }
    }

    /// Scatter `count` entities of `kind` uniformly over cells that are
    /// neither obstacles nor already hosting an entity, without replacement.
    ///
    /// Fails without placing anything when fewer than `count` such cells
    /// exist. Deterministic for a fixed `rng_seed`.
    pub fn populate_random(
        &mut self,
        kind: EntityKind,
        count: usize,
    ) -> Result<(), SimulationError> {
        let (height, width) = (self.grid.height(), self.grid.width());
        let occupied: HashSet<Cell> = self
            .humans
            .iter()
            .chain(self.zombies.iter())
            .copied()
            .collect();
        let mut free: Vec<Cell> = (0..height)
            .flat_map(|row| (0..width).map(move |col| Cell::new(row, col)))
            .filter(|&cell| self.grid.is_empty(cell) && !occupied.contains(&cell))
            .collect();
        if free.len() < count {
            return Err(SimulationError::InsufficientSpace {
                requested: count,
                available: free.len(),
            });
        }

        // Partial Fisher-Yates: the first `count` slots end up holding a
        // uniform draw without replacement.
        for picked in 0..count {
            let swap = self.rng.random_range(picked..free.len());
            free.swap(picked, swap);
        }
        self.roster_mut(kind).extend(free[..count].iter().copied());
        debug!(?kind, count, "scattered entities");
        Ok(())
    }

    /// Compute the 4-way shortest-distance field seeded at every entity of
    /// `kind`, flowing around obstacles.
    ///
    /// Unreached cells keep the sentinel: obstacles, walled-off pockets, and
    /// the whole grid when the roster is empty. The world itself is left
    /// untouched, so repeated calls over unchanged state return equal fields.
    #[must_use]
    pub fn compute_distance_field(&self, kind: EntityKind) -> DistanceField {
        let mut visited = self.grid.blank();
        let mut field = DistanceField::unreached(self.grid.height(), self.grid.width());

        let mut boundary: Frontier = self.roster(kind).iter().copied().collect();
        for seed in boundary.iter() {
            // Roster cells are validated in-bounds at insertion.
            let _ = visited.set_full(seed);
            field.seed_zero(seed);
        }

        while let Ok(current) = boundary.dequeue() {
            let next = field.at(current) + 1;
            for neighbor in self.grid.four_neighbors(current) {
                if visited.is_empty(neighbor) && self.grid.is_empty(neighbor) {
                    let _ = visited.set_full(neighbor);
                    boundary.enqueue(neighbor);
                    field.relax(neighbor, next);
                }
            }
        }

        trace!(?kind, seeds = self.roster(kind).len(), "computed distance field");
        field
    }

    /// Step every human one move away from the zombies, diagonals allowed.
    ///
    /// Each human inspects its eight neighbors in enumeration order and takes
    /// the first strict improvement over its own cell's distance, staying put
    /// when none exists. All decisions read the same `zombie_distances`
    /// snapshot and the roster is replaced as a batch, so no move within a
    /// tick influences another. Returns how many humans changed cell.
    pub fn move_humans(&mut self, zombie_distances: &DistanceField) -> usize {
        let grid = &self.grid;
        let next: Vec<Cell> = self
            .humans
            .par_iter()
            .map(|&human| Self::flee_step(grid, zombie_distances, human))
            .collect();
        let moved = next
            .iter()
            .zip(self.humans.iter())
            .filter(|(new, old)| new != old)
            .count();
        self.humans = next;
        trace!(moved, humans = self.humans.len(), "humans fled");
        moved
    }

    /// Step every zombie one orthogonal move toward the humans.
    ///
    /// Mirrors [`Apocalypse::move_humans`] with four-way adjacency and a
    /// strict decrease of `human_distances`. Returns how many zombies changed
    /// cell.
    pub fn move_zombies(&mut self, human_distances: &DistanceField) -> usize {
        let grid = &self.grid;
        let next: Vec<Cell> = self
            .zombies
            .par_iter()
            .map(|&zombie| Self::chase_step(grid, human_distances, zombie))
            .collect();
        let moved = next
            .iter()
            .zip(self.zombies.iter())
            .filter(|(new, old)| new != old)
            .count();
        self.zombies = next;
        trace!(moved, zombies = self.zombies.len(), "zombies pursued");
        moved
    }

    fn flee_step(grid: &OccupancyGrid, field: &DistanceField, from: Cell) -> Cell {
        let sentinel = field.sentinel();
        let mut best = from;
        let mut best_distance = field.get(from).unwrap_or(sentinel);
        for neighbor in grid.eight_neighbors(from) {
            if !grid.is_empty(neighbor) {
                continue;
            }
            let candidate = field.get(neighbor).unwrap_or(sentinel);
            if candidate > best_distance {
                best_distance = candidate;
                best = neighbor;
            }
        }
        best
    }

    fn chase_step(grid: &OccupancyGrid, field: &DistanceField, from: Cell) -> Cell {
        let sentinel = field.sentinel();
        let mut best = from;
        let mut best_distance = field.get(from).unwrap_or(sentinel);
        for neighbor in grid.four_neighbors(from) {
            if !grid.is_empty(neighbor) {
                continue;
            }
            let candidate = field.get(neighbor).unwrap_or(sentinel);
            if candidate < best_distance {
                best_distance = candidate;
                best = neighbor;
            }
        }
        best
    }

    /// Advance the simulation one tick.
    ///
    /// Humans flee the zombie field first, then zombies pursue a human field
    /// computed after the flight, so pursuers chase where their prey actually
    /// went. The resulting summary is appended to the bounded history.
    pub fn step(&mut self) -> TickSummary {
        let zombie_field = self.compute_distance_field(EntityKind::Zombie);
        let humans_moved = self.move_humans(&zombie_field);
        let human_field = self.compute_distance_field(EntityKind::Human);
        let zombies_moved = self.move_zombies(&human_field);

        self.tick = self.tick.next();
        let summary = TickSummary {
            tick: self.tick,
            humans: self.humans.len(),
            zombies: self.zombies.len(),
            humans_moved,
            zombies_moved,
        };
        if self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(summary.clone());
        debug!(
            tick = self.tick.0,
            humans_moved, zombies_moved, "advanced outbreak tick"
        );
        summary
    }
}
