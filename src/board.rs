use std::fmt::{Debug, Display, Formatter};
use std::mem;

use ndarray::Array2;
use tracing::{debug, info, trace, warn};

use crate::cell::CellView;
use crate::error::TraceError;
use crate::history::Move;
use crate::location::{Coord, Location, Probe};
use crate::observer::CompletionObserver;
use crate::pair::PairId;
use crate::puzzle::PuzzleDefinition;
use crate::render::Canvas;
use crate::shape::{BoardShape, SquareStep};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Stroke {
    #[default]
    Idle,
    Active {
        pair: PairId,
        // the pair's path when the stroke began, kept for undo
        previous: Vec<Location>,
    },
}

/// The path-tracing engine: a puzzle in play.
///
/// A board owns the occupation of every cell and one path per pair. Pointer input arrives as a stream of strokes,
/// [`begin_stroke`](Self::begin_stroke), any number of [`extend_stroke`](Self::extend_stroke) calls, then
/// [`end_stroke`](Self::end_stroke), with every position already resolved to a [`Probe`].
///
/// Stroke handling never fails. Positions off the grid, jumps between non-adjacent cells, collisions with other pairs
/// and calls out of order all degrade to cancelling the stroke or doing nothing.
/// Once every pair is connected the board is finished and ignores all further input.
///
/// # Invariants
/// - Both endpoints of every pair are always occupied by that pair.
/// - Consecutive cells of a path are orthogonal neighbors, no path visits a cell twice,
///   and a non-empty path starts at one of its pair's endpoints.
/// - Every occupied cell that is not an endpoint belongs to exactly the path of its occupant.
pub struct Board {
    pub(crate) puzzle: PuzzleDefinition,
    // row-major, indexed by (row, column)
    pub(crate) grid: Array2<Option<PairId>>,
    // indexed by pair id
    pub(crate) paths: Vec<Vec<Location>>,
    pub(crate) stroke: Stroke,
    pub(crate) finished: bool,
    pub(crate) history: Vec<Move>,
    observer: Option<Box<dyn CompletionObserver>>,
    canvas: Option<Box<dyn Canvas>>,
}

impl Board {
    /// Start playing `puzzle`, with every endpoint placed and every path empty.
    ///
    /// Returns [`TraceError::InvalidPuzzle`] if the definition is not [valid](PuzzleDefinition::is_valid).
    pub fn new(puzzle: PuzzleDefinition) -> Result<Self, TraceError> {
        if !puzzle.is_valid() {
            warn!(name = %puzzle.name, "refusing to play an invalid puzzle");
            return Err(TraceError::InvalidPuzzle {
                name: puzzle.name,
                reasons: puzzle.invalid_reasons,
            });
        }

        let mut grid = Array2::from_elem((puzzle.size, puzzle.size), None);
        for pair in &puzzle.pairs {
            let (a, b) = pair.endpoints();
            grid[a.as_index()] = Some(pair.id);
            grid[b.as_index()] = Some(pair.id);
        }
        let paths = vec![Vec::new(); puzzle.pairs.len()];

        Ok(Self::from_parts(puzzle, grid, paths, false))
    }

    pub(crate) fn from_parts(puzzle: PuzzleDefinition, grid: Array2<Option<PairId>>, paths: Vec<Vec<Location>>, finished: bool) -> Self {
        Self {
            puzzle,
            grid,
            paths,
            stroke: Stroke::Idle,
            finished,
            history: Vec::new(),
            observer: None,
            canvas: None,
        }
    }

    /// Register the observer told when the puzzle is solved, replacing any previous one.
    pub fn set_completion_observer(&mut self, observer: impl CompletionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Register the canvas asked to redraw after every change, replacing any previous one.
    ///
    /// The canvas is drawn once immediately.
    pub fn set_canvas(&mut self, canvas: impl Canvas + 'static) {
        self.canvas = Some(Box::new(canvas));
        self.redraw();
    }

    /// The puzzle being played.
    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    /// Number of rows (and columns) of the grid.
    pub fn size(&self) -> Coord {
        self.puzzle.size
    }

    /// The occupation of every cell, indexed by `(row, column)`.
    pub fn grid(&self) -> &Array2<Option<PairId>> {
        &self.grid
    }

    /// The pair occupying `location`, or [`None`] if it is empty or off the grid.
    pub fn occupant(&self, location: Location) -> Option<PairId> {
        self.grid.get(location.as_index()).copied().flatten()
    }

    /// The path currently drawn for `pair`; empty for unknown pairs.
    pub fn path(&self, pair: PairId) -> &[Location] {
        self.paths.get(pair).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every path, indexed by pair id.
    pub fn paths(&self) -> &[Vec<Location>] {
        &self.paths
    }

    /// The pair being drawn, if a stroke is in progress.
    pub fn active_pair(&self) -> Option<PairId> {
        match self.stroke {
            Stroke::Active { pair, .. } => Some(pair),
            Stroke::Idle => None,
        }
    }

    /// Whether the puzzle has been solved. A finished board ignores all input.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether every pair's path currently joins both of its endpoints.
    pub fn is_solved(&self) -> bool {
        self.puzzle.pairs.iter().all(|pair| pair.joined_by(&self.paths[pair.id]))
    }

    /// Finished strokes, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// A read-only view of the current state, as handed to a [`Canvas`].
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            puzzle: &self.puzzle,
            grid: &self.grid,
            paths: &self.paths,
            finished: self.finished,
        }
    }

    /// Pointer down.
    ///
    /// Touching an endpoint restarts that pair's path from it. Touching a cell of an existing path cuts the path back
    /// to that cell. Touching an empty cell starts nothing. Any stroke of another pair still in progress is cancelled.
    ///
    /// A probe off the grid forgets the stroke in progress without clearing the cells it already claimed.
    pub fn begin_stroke(&mut self, probe: impl Into<Probe>) {
        if self.finished {
            return;
        }

        let Some(location) = probe.into().on_grid(self.puzzle.size) else {
            if let Some(pair) = self.active_pair() {
                debug!(pair, "stroke began off the grid, forgetting the active pair");
            }
            self.stroke = Stroke::Idle;
            return;
        };

        let Some(pair) = self.grid[location.as_index()] else {
            trace!(?location, "stroke began on an empty cell");
            self.stroke = Stroke::Idle;
            self.redraw();
            return;
        };

        if let Some(active) = self.active_pair() {
            if active != pair && !self.paths[active].is_empty() {
                self.cancel_stroke();
            }
        }

        let previous = match mem::take(&mut self.stroke) {
            Stroke::Active { pair: active, previous } if active == pair => previous,
            _ => self.paths[pair].clone(),
        };

        debug!(pair, ?location, "stroke began");
        if self.puzzle.pairs[pair].is_endpoint(location) {
            self.vacate(pair);
            self.paths[pair].push(location);
        } else if let Some(index) = self.paths[pair].iter().position(|step| *step == location) {
            self.retract(pair, index);
        } else {
            warn!(pair, ?location, "cell is occupied but missing from its pair's path, leaving the path as is");
        }

        self.stroke = Stroke::Active { pair, previous };
        self.redraw();
    }

    /// Pointer move.
    ///
    /// Moving onto an empty neighbor claims it. Moving back onto the stroke's own path retracts it. Reaching the other
    /// endpoint connects the pair and ends the stroke. Leaving the grid, jumping to a cell that is not a neighbor, or
    /// running into another pair cancels the stroke and clears every cell it claimed.
    pub fn extend_stroke(&mut self, probe: impl Into<Probe>) {
        if self.finished {
            return;
        }
        let Some(pair) = self.active_pair() else {
            return;
        };
        let Some(&last) = self.paths[pair].last() else {
            return;
        };

        let Some(location) = probe.into().on_grid(self.puzzle.size) else {
            debug!(pair, "stroke left the grid");
            self.cancel_stroke();
            self.redraw();
            return;
        };

        if location == last {
            return;
        }

        if !SquareStep::adjacent(last, location) {
            debug!(pair, from = ?last, to = ?location, "stroke jumped");
            self.cancel_stroke();
            self.redraw();
            return;
        }

        if self.puzzle.pairs[pair].is_endpoint(location) && !self.paths[pair].contains(&location) {
            self.grid[location.as_index()] = Some(pair);
            self.paths[pair].push(location);
            info!(pair, length = self.paths[pair].len(), "pair connected");
            self.record_stroke();
            self.check_completion();
            self.redraw();
            return;
        }

        let occupant = self.grid[location.as_index()];
        match occupant {
            Some(other) if other != pair && self.puzzle.pairs[other].is_endpoint(location) => {
                debug!(pair, other, "stroke ran into another pair's endpoint");
                self.cancel_stroke();
            }
            None => {
                trace!(pair, ?location, "stroke extended");
                self.grid[location.as_index()] = Some(pair);
                self.paths[pair].push(location);
            }
            Some(owner) if owner == pair => {
                if let Some(index) = self.paths[pair].iter().position(|step| *step == location) {
                    self.retract(pair, index);
                }
            }
            Some(other) => {
                debug!(pair, other, "stroke ran into another pair's path");
                self.cancel_stroke();
            }
        }

        self.redraw();
    }

    /// Pointer up.
    ///
    /// The path is kept exactly as drawn, connected or not, and the stroke is recorded in the [history](Self::history).
    pub fn end_stroke(&mut self) {
        if self.finished {
            return;
        }
        let Some(pair) = self.active_pair() else {
            return;
        };
        if self.paths[pair].is_empty() {
            return;
        }

        debug!(pair, length = self.paths[pair].len(), "stroke released");
        self.record_stroke();
        self.check_completion();
    }

    /// Take back the most recent stroke, restoring the path its pair had before it.
    ///
    /// Cells of that earlier path which another pair has claimed since are not reclaimed; the restored path stops
    /// short of the first such cell. Does nothing while a stroke is in progress or once the puzzle is finished.
    pub fn undo(&mut self) -> Option<Move> {
        if self.finished || self.active_pair().is_some() {
            return None;
        }
        let last = self.history.pop()?;

        self.vacate(last.pair);
        for &location in &last.previous {
            let occupant = self.grid[location.as_index()];
            match occupant {
                Some(owner) if owner != last.pair => {
                    debug!(pair = last.pair, owner, ?location, "earlier path is blocked, restoring a prefix");
                    break;
                }
                _ => {
                    self.grid[location.as_index()] = Some(last.pair);
                    self.paths[last.pair].push(location);
                }
            }
        }

        info!(pair = last.pair, remaining = self.history.len(), "stroke undone");
        self.check_completion();
        self.redraw();
        Some(last)
    }

    fn record_stroke(&mut self) {
        if let Stroke::Active { pair, previous } = mem::take(&mut self.stroke) {
            self.history.push(Move {
                pair,
                path: self.paths[pair].clone(),
                previous,
            });
        }
    }

    fn cancel_stroke(&mut self) {
        if let Stroke::Active { pair, .. } = mem::take(&mut self.stroke) {
            debug!(pair, "stroke cancelled");
            self.vacate(pair);
        }
    }

    // clear the whole path of `pair`, releasing every cell but its endpoints
    fn vacate(&mut self, pair: PairId) {
        let owner = &self.puzzle.pairs[pair];
        for location in self.paths[pair].drain(..) {
            if !owner.is_endpoint(location) {
                self.grid[location.as_index()] = None;
            }
        }
    }

    // keep the path of `pair` up to and including `index`
    fn retract(&mut self, pair: PairId, index: usize) {
        let owner = &self.puzzle.pairs[pair];
        for location in self.paths[pair].drain(index + 1..) {
            if !owner.is_endpoint(location) {
                self.grid[location.as_index()] = None;
            }
        }
    }

    fn check_completion(&mut self) {
        if self.finished || !self.is_solved() {
            return;
        }

        self.finished = true;
        info!(puzzle = %self.puzzle.name, moves = self.history.len(), "puzzle solved");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_completed();
        }
    }

    fn redraw(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.redraw(Frame {
                puzzle: &self.puzzle,
                grid: &self.grid,
                paths: &self.paths,
                finished: self.finished,
            });
        }
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("puzzle", &self.puzzle.name)
            .field("size", &self.puzzle.size)
            .field("paths", &self.paths)
            .field("stroke", &self.stroke)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.frame())
    }
}

/// A read-only view of a [`Board`], as handed to a [`Canvas`] on every redraw.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    puzzle: &'a PuzzleDefinition,
    grid: &'a Array2<Option<PairId>>,
    paths: &'a [Vec<Location>],
    finished: bool,
}

impl<'a> Frame<'a> {
    /// The puzzle being played.
    pub fn puzzle(&self) -> &'a PuzzleDefinition {
        self.puzzle
    }

    /// Number of rows (and columns) of the grid.
    pub fn size(&self) -> Coord {
        self.puzzle.size
    }

    /// The occupation of every cell, indexed by `(row, column)`.
    pub fn grid(&self) -> &'a Array2<Option<PairId>> {
        self.grid
    }

    /// Every path, indexed by pair id.
    pub fn paths(&self) -> &'a [Vec<Location>] {
        self.paths
    }

    /// Whether the puzzle has been solved.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// What the cell at `location` shows.
    pub fn cell(&self, location: Location) -> CellView {
        match self.grid.get(location.as_index()).copied().flatten() {
            None => CellView::Empty,
            Some(pair) if self.puzzle.pairs[pair].is_endpoint(location) => CellView::Terminus { pair },
            Some(pair) => CellView::Path { pair },
        }
    }

    /// What every cell shows, indexed by `(row, column)`.
    pub fn cells(&self) -> Array2<CellView> {
        Array2::from_shape_fn(self.grid.raw_dim(), |index| self.cell(Location::from(index)))
    }

    /// The character a cell prints as: the pair's letter in upper case on endpoints, lower case on paths.
    pub fn glyph(&self, cell: CellView) -> char {
        match cell {
            CellView::Terminus { pair } => self.puzzle.pairs[pair].display.to_ascii_uppercase(),
            CellView::Path { pair } => self.puzzle.pairs[pair].display.to_ascii_lowercase(),
            CellView::Empty => '.',
        }
    }
}

impl Display for Frame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells();
        let mut out = String::with_capacity(cells.nrows() * (cells.ncols() + 1));

        for row in cells.rows() {
            for cell in row {
                out.push(self.glyph(*cell));
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
