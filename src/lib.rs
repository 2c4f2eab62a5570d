#![warn(missing_docs)]

//! # `chromate`
//!
//! A path-tracing engine for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles as posited in the mobile
//! game Flow Free: a square grid holds pairs of endpoints, and the player draws orthogonal paths joining every pair
//! without any two paths crossing.
//!
//! Begin by obtaining a [`PuzzleDefinition`], either from an XML document through the [`loader`] or by hand with a
//! [`PuzzleBuilder`](builder::PuzzleBuilder). Turn it into a [`Board`], then feed it pointer strokes:
//! [`begin_stroke`](Board::begin_stroke), [`extend_stroke`](Board::extend_stroke) and
//! [`end_stroke`](Board::end_stroke).
//!
//! ```
//! use chromate::builder::PuzzleBuilder;
//! use chromate::{Board, Location};
//!
//! let puzzle = PuzzleBuilder::with_size("row", 5)
//!     .add_pair('A', (Location(0, 0), Location(0, 4)))
//!     .build();
//! let mut board = Board::new(puzzle).unwrap();
//!
//! board.begin_stroke(Location(0, 0));
//! for col in 1..=4 {
//!     board.extend_stroke(Location(0, col));
//! }
//! assert!(board.is_finished());
//! assert_eq!(board.to_string(), "AaaaA\n.....\n.....\n.....\n.....\n");
//! ```
//!
//! # Internals
//! The board keeps a flat, row-major occupation grid mapping every cell to the pair which owns it, plus one ordered
//! path per pair. Endpoints are placed when the board is built and never released. Strokes claim cells as the pointer
//! moves onto empty neighbors, release them when the pointer retraces its path, and release everything they claimed
//! when cancelled. A stroke is cancelled by leaving the grid, by jumping over cells, or by running into another pair.
//!
//! Drawing and pointer geometry live outside the engine, behind the [`Canvas`](render::Canvas) and
//! [`ResolveCell`](render::ResolveCell) traits of the [`render`] module.

pub use board::{Board, Frame};
pub use cell::CellView;
pub use error::{InvalidReason, SnapshotError, TraceError};
pub use history::Move;
pub use location::{Location, Probe};
pub use observer::CompletionObserver;
pub use pair::{PairId, PuzzlePair};
pub use puzzle::PuzzleDefinition;
pub use session::Session;
pub use settings::Settings;
pub use snapshot::{SavedPair, Snapshot};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod error;
pub(crate) mod history;
pub(crate) mod location;
pub(crate) mod observer;
pub(crate) mod pair;
pub(crate) mod puzzle;
pub(crate) mod session;
pub(crate) mod settings;
pub(crate) mod snapshot;
pub mod builder;
pub mod catalog;
pub mod loader;
pub mod render;
pub mod shape;
