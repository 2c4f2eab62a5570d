use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chromate::catalog;
use chromate::loader::load_puzzle;
use chromate::render::TextCanvas;
use chromate::{Board, Probe, Settings, Snapshot};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "play")]
#[command(about = "Draw paths on Numberlink puzzles from the terminal")]
struct Cli {
    /// Settings file; defaults are used when it does not exist
    #[arg(long, global = true, default_value = "chromate.toml")]
    settings: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the puzzles of a directory
    List {
        /// Directory to scan instead of the one from the settings
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Play a puzzle, reading gestures from stdin
    ///
    /// One gesture per line: `down R C`, `move R C`, `up`, `off` or `undo`.
    /// Negative coordinates count as off the grid.
    Run {
        /// Puzzle document to play
        #[arg(required_unless_present = "resume")]
        puzzle: Option<PathBuf>,
        /// Continue from a saved snapshot instead
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Save a snapshot here once stdin is exhausted
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Gesture {
    Down(Probe),
    Move(Probe),
    Up,
    Off,
    Undo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("reading settings from {}", cli.settings.display()))?;

    match cli.command {
        Commands::List { dir } => list(&dir.unwrap_or_else(|| settings.puzzle_dir.clone())),
        Commands::Run { puzzle, resume, save } => run(&settings, puzzle.as_deref(), resume.as_deref(), save.as_deref()),
    }
}

fn list(dir: &Path) -> Result<()> {
    let entries = catalog::scan(dir).with_context(|| format!("listing {}", dir.display()))?;
    let mut stdout = io::stdout().lock();

    for entry in entries {
        let file = entry.path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        let definition = &entry.definition;
        match definition.invalid_reasons().first() {
            None => writeln!(
                stdout,
                "{file}\t{name}\t{size}x{size}\t{pairs} pairs",
                name = definition.name(),
                size = definition.size(),
                pairs = definition.pairs().len(),
            )?,
            Some(reason) => writeln!(stdout, "{file}\tinvalid: {reason}")?,
        }
    }

    Ok(())
}

fn open_board(puzzle: Option<&Path>, resume: Option<&Path>) -> Result<Board> {
    if let Some(path) = resume {
        let text = fs::read_to_string(path).with_context(|| format!("reading snapshot {}", path.display()))?;
        let board = Board::restore(Snapshot::from_json(&text)?)?;
        info!(name = board.puzzle().name(), "resumed");
        return Ok(board);
    }

    let Some(path) = puzzle else {
        bail!("nothing to play: give a puzzle or --resume");
    };
    Ok(Board::new(load_puzzle(path))?)
}

fn run(settings: &Settings, puzzle: Option<&Path>, resume: Option<&Path>, save: Option<&Path>) -> Result<()> {
    let mut board = open_board(puzzle, resume)?;

    let solved = Rc::new(Cell::new(false));
    let flag = Rc::clone(&solved);
    board.set_completion_observer(move || flag.set(true));

    let canvas = Rc::new(RefCell::new(TextCanvas::new(settings)));
    board.set_canvas(Rc::clone(&canvas));

    let mut stdout = io::stdout().lock();
    let mut shown = 0;
    show(&mut stdout, &canvas, &mut shown)?;

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let gesture = match parse_gesture(&line) {
            Ok(Some(gesture)) => gesture,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "line {}: {err}", number + 1)?;
                continue;
            }
        };

        debug!(?gesture, "gesture");
        match gesture {
            Gesture::Down(probe) => board.begin_stroke(probe),
            Gesture::Move(probe) => board.extend_stroke(probe),
            Gesture::Up => board.end_stroke(),
            Gesture::Off => board.extend_stroke(Probe::OutOfBounds),
            Gesture::Undo => {
                if board.undo().is_none() {
                    writeln!(stdout, "nothing to undo")?;
                }
            }
        }
        show(&mut stdout, &canvas, &mut shown)?;

        if solved.get() {
            writeln!(stdout, "solved in {} moves", board.history().len())?;
            solved.set(false);
        }
    }

    if let Some(path) = save {
        fs::write(path, board.snapshot().to_json()?).with_context(|| format!("saving to {}", path.display()))?;
        info!(path = %path.display(), "snapshot saved");
    }

    Ok(())
}

// print the latest frame if the canvas drew one since the last call
fn show(out: &mut impl Write, canvas: &RefCell<TextCanvas>, shown: &mut usize) -> io::Result<()> {
    let canvas = canvas.borrow();
    if canvas.redraws() > *shown {
        *shown = canvas.redraws();
        writeln!(out, "{}", canvas.latest())?;
    }
    Ok(())
}

fn parse_gesture(line: &str) -> Result<Option<Gesture>> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    let probe = |words: &[&str]| -> Result<Probe> {
        let [row, col] = words else {
            bail!("expected a row and a column");
        };
        Ok(Probe::from_signed(row.parse().context("row")?, col.parse().context("column")?))
    };

    Ok(Some(match words.as_slice() {
        [] => return Ok(None),
        ["down", rest @ ..] => Gesture::Down(probe(rest)?),
        ["move", rest @ ..] => Gesture::Move(probe(rest)?),
        ["up"] => Gesture::Up,
        ["off"] => Gesture::Off,
        ["undo"] => Gesture::Undo,
        [word, ..] => bail!("unknown gesture {word:?}"),
    }))
}
