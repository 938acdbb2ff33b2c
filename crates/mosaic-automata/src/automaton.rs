//! The closed set of automata and their shared lifecycle.

use rand::Rng;
use tracing::debug;

use crate::ant::LangtonsAnt;
use crate::brain::Brain;
use crate::canvas::Canvas;
use crate::cyclic::Cyclic;
use crate::display::Display;
use crate::elementary::Elementary;
use crate::lava::Lava;
use crate::life::Life;
use crate::order_chaos::OrderChaos;
use crate::{Error, Result, Rgb};

/// Automaton families the scheduler can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AutomatonKind {
    Elementary,
    Life,
    Brain,
    Ant,
    Cyclic,
    Lava,
    OrderChaos,
}

impl AutomatonKind {
    pub const ALL: [Self; 7] = [
        Self::Elementary,
        Self::Life,
        Self::Brain,
        Self::Ant,
        Self::Cyclic,
        Self::Lava,
        Self::OrderChaos,
    ];

    /// Configuration name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::Life => "life",
            Self::Brain => "brain",
            Self::Ant => "ant",
            Self::Cyclic => "cyclic",
            Self::Lava => "lava",
            Self::OrderChaos => "order_chaos",
        }
    }
}

impl std::fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AutomatonKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|k| k.label() == wanted)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// One automaton of any kind, with its buffers and parameters.
#[derive(Debug, Clone)]
pub enum Simulation {
    Elementary(Elementary),
    Life(Life),
    Brain(Brain),
    Ant(LangtonsAnt),
    Cyclic(Cyclic),
    Lava(Lava),
    OrderChaos(OrderChaos),
}

impl Simulation {
    /// Allocate a `kind` automaton with randomized parameters.
    pub fn create<R: Rng + ?Sized>(kind: AutomatonKind, width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Ok(match kind {
            AutomatonKind::Elementary => Self::Elementary(Elementary::random(width, height, rng)?),
            AutomatonKind::Life => Self::Life(Life::random(width, height, rng)?),
            AutomatonKind::Brain => Self::Brain(Brain::new(width, height)?),
            AutomatonKind::Ant => Self::Ant(LangtonsAnt::random(width, height, rng)?),
            AutomatonKind::Cyclic => Self::Cyclic(Cyclic::random(width, height, rng)?),
            AutomatonKind::Lava => Self::Lava(Lava::random(width, height, rng)?),
            AutomatonKind::OrderChaos => Self::OrderChaos(OrderChaos::random(width, height, rng)?),
        })
    }

    pub fn kind(&self) -> AutomatonKind {
        match self {
            Self::Elementary(_) => AutomatonKind::Elementary,
            Self::Life(_) => AutomatonKind::Life,
            Self::Brain(_) => AutomatonKind::Brain,
            Self::Ant(_) => AutomatonKind::Ant,
            Self::Cyclic(_) => AutomatonKind::Cyclic,
            Self::Lava(_) => AutomatonKind::Lava,
            Self::OrderChaos(_) => AutomatonKind::OrderChaos,
        }
    }

    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Self::Elementary(a) => a.init(rng),
            Self::Life(a) => a.init(rng),
            Self::Brain(a) => a.init(rng),
            Self::Ant(a) => a.init(rng),
            Self::Cyclic(a) => a.init(rng),
            Self::Lava(a) => a.init(rng),
            Self::OrderChaos(a) => a.init(rng),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Self::Elementary(a) => a.update(rng),
            Self::Life(a) => a.update(rng),
            Self::Brain(a) => a.update(rng),
            Self::Ant(a) => a.update(rng),
            Self::Cyclic(a) => a.update(rng),
            Self::Lava(a) => a.update(rng),
            Self::OrderChaos(a) => a.update(rng),
        }
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        match self {
            Self::Elementary(a) => a.render(canvas),
            Self::Life(a) => a.render(canvas),
            Self::Brain(a) => a.render(canvas),
            Self::Ant(a) => a.render(canvas),
            Self::Cyclic(a) => a.render(canvas),
            Self::Lava(a) => a.render(canvas),
            Self::OrderChaos(a) => a.render(canvas),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Elementary(a) => a.name(),
            Self::Life(a) => a.name(),
            Self::Brain(a) => a.name(),
            Self::Ant(a) => a.name(),
            Self::Cyclic(a) => a.name(),
            Self::Lava(a) => a.name(),
            Self::OrderChaos(a) => a.name(),
        }
    }

    /// Whether every cell holds a value of the variant's state domain.
    pub fn cells_in_domain(&self) -> bool {
        match self {
            Self::Elementary(a) => a.cells_in_domain(),
            Self::Life(a) => a.cells_in_domain(),
            Self::Brain(a) => a.cells_in_domain(),
            Self::Ant(a) => a.cells_in_domain(),
            Self::Cyclic(a) => a.cells_in_domain(),
            Self::Lava(a) => a.cells_in_domain(),
            Self::OrderChaos(a) => a.cells_in_domain(),
        }
    }
}

/// Where an automaton is in its init/update/render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Updated,
    Rendered,
}

/// A simulation plus its lifecycle and frame counter.
#[derive(Debug, Clone)]
pub struct Automaton {
    simulation: Simulation,
    lifecycle: Lifecycle,
    frames: u64,
}

impl Automaton {
    /// Wrap a simulation that has not been initialized yet.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            lifecycle: Lifecycle::Uninitialized,
            frames: 0,
        }
    }

    /// Allocate a `kind` automaton with randomized parameters.
    ///
    /// The result still needs [`init`](Self::init).
    pub fn create<R: Rng + ?Sized>(kind: AutomatonKind, width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let simulation = Simulation::create(kind, width, height, rng)?;
        debug!(%kind, width, height, "automaton allocated");
        Ok(Self::new(simulation))
    }

    /// Clear buffers, seed initial conditions and reset the frame counter.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.simulation.init(rng);
        self.frames = 0;
        self.lifecycle = Lifecycle::Initialized;
    }

    /// Advance one generation, initializing first if needed.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.lifecycle == Lifecycle::Uninitialized {
            self.init(rng);
        }
        self.simulation.update(rng);
        self.lifecycle = Lifecycle::Updated;
    }

    /// Draw the current generation. An uninitialized automaton draws black.
    pub fn render<D: Display + ?Sized>(&mut self, canvas: &mut Canvas<'_, D>) {
        if self.lifecycle == Lifecycle::Uninitialized {
            canvas.fill(Rgb::BLACK);
            return;
        }
        self.simulation.render(canvas);
        self.lifecycle = Lifecycle::Rendered;
    }

    /// Update, render, present and count the frame.
    pub fn step<R: Rng + ?Sized, D: Display + ?Sized>(&mut self, rng: &mut R, canvas: &mut Canvas<'_, D>) {
        self.update(rng);
        self.render(canvas);
        canvas.present();
        self.frames += 1;
    }

    pub fn kind(&self) -> AutomatonKind {
        self.simulation.kind()
    }

    pub fn name(&self) -> String {
        self.simulation.name()
    }

    /// Frames stepped since the last init.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn cells_in_domain(&self) -> bool {
        self.simulation.cells_in_domain()
    }
}
