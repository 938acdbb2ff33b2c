//! Mosaic Automata
//!
//! Cellular automata rendered onto a tiled panel canvas.
//!
//! # Lifecycle
//!
//! Every automaton follows the same contract:
//!
//! ```text
//! Uninitialized ──init──▶ Initialized ──update──▶ Updated ──render──▶ Rendered
//!                                                    ▲                   │
//!                                                    └──────update───────┘
//! ```
//!
//! `init` may be called again at any point to restart. `update` advances one
//! generation using only the previous one (two owned buffers, swapped after
//! each generation). `render` writes every logical cell through the
//! [`Canvas`] and never touches simulation state. The random source is
//! passed in explicitly, so a seeded [`rand::rngs::StdRng`] reproduces a run.
//!
//! # Variants
//!
//! | Kind | States | Rule |
//! |------|--------|------|
//! | [`Elementary`] | 0/1 history | Wolfram rule number |
//! | [`Life`] | 0/1 | birth/survival masks ([`LifeRule`]) |
//! | [`Brain`] | off/on/dying | off→on with exactly two on neighbors |
//! | [`LangtonsAnt`] | 0/1 + walkers | turn by cell, flip, advance |
//! | [`Cyclic`] | `0..N` | advance when enough neighbors lead |
//! | [`Lava`] | crust + magma | elementary crust bubbling into Life |
//! | [`OrderChaos`] | two bands + field | symmetric vs chaotic rules meeting in Life |
//!
//! The closed [`Simulation`] enum dispatches over all seven; [`Automaton`]
//! adds lifecycle tracking and a frame counter.
//!
//! # Rendering
//!
//! Automata draw in logical coordinates through a [`Canvas`], which maps
//! every pixel with a [`mosaic_panel::PanelMapper`] and hands it to a
//! [`Display`] driver.

pub mod ant;
pub mod automaton;
pub mod brain;
pub mod canvas;
pub mod color;
pub mod cyclic;
pub mod display;
pub mod elementary;
mod error;
pub mod grid;
pub mod lava;
pub mod life;
pub mod order_chaos;
pub mod patterns;
pub mod rules;

pub use ant::{Ant, Heading, LangtonsAnt, MAX_ANTS};
pub use automaton::{Automaton, AutomatonKind, Lifecycle, Simulation};
pub use brain::{Brain, BrainCell};
pub use canvas::Canvas;
pub use color::{PaletteScheme, Rgb};
pub use cyclic::{Cyclic, CyclicParams, CyclicSeed, Threshold};
pub use display::{pack_rgb565, unpack_rgb565, Display, FrameBuffer, PackedColor};
pub use elementary::{Elementary, SeedPattern};
pub use error::{Error, Result};
pub use grid::{CellGrid, DoubleBuffer};
pub use lava::{Lava, Magma};
pub use life::Life;
pub use order_chaos::{OrderChaos, Origin, Tagged};
pub use patterns::Pattern;
pub use rules::{ElementaryRule, LifeRule};
