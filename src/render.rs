//! The rendering side of a [`Board`](crate::Board): drawing frames and turning pointer positions into cells.
//!
//! The engine never draws anything itself. It hands a [`Frame`] to its [`Canvas`] after every change, and expects
//! pointer positions to have been resolved to a [`Probe`] by whatever [`ResolveCell`] matches the drawn geometry.

use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::board::Frame;
use crate::location::{Coord, Location, Probe};
use crate::pair::PairId;
use crate::settings::Settings;

/// Something that draws a board.
pub trait Canvas {
    /// Draw `frame`, replacing whatever was drawn before.
    fn redraw(&mut self, frame: Frame<'_>);
}

impl<C> Canvas for Rc<RefCell<C>>
where
    C: Canvas + ?Sized,
{
    fn redraw(&mut self, frame: Frame<'_>) {
        self.borrow_mut().redraw(frame)
    }
}

/// Something that knows where each cell is drawn.
pub trait ResolveCell {
    /// The cell under the pointer position `(x, y)`, or [`Probe::OutOfBounds`].
    fn resolve(&self, x: f32, y: f32) -> Probe;
}

/// Margin around the grid when none is specified, in pixels.
pub const DEFAULT_PADDING: f32 = 48.0;

/// A square grid drawn into a `width` by `height` view with `padding` pixels of margin on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    /// Cells per side.
    pub size: Coord,
    /// View width in pixels.
    pub width: f32,
    /// View height in pixels.
    pub height: f32,
    /// Margin on every side in pixels.
    pub padding: f32,
}

impl GridGeometry {
    /// Geometry for a `size` by `size` grid with the default padding.
    pub fn new(size: Coord, width: f32, height: f32) -> Self {
        Self {
            size,
            width,
            height,
            padding: DEFAULT_PADDING,
        }
    }

    /// Width and height of one cell in pixels.
    pub fn cell_extent(&self) -> (f32, f32) {
        let size = self.size.max(1) as f32;
        ((self.width - 2.0 * self.padding) / size, (self.height - 2.0 * self.padding) / size)
    }

    /// Pixel position of the center of `location`.
    pub fn center_of(&self, location: Location) -> (f32, f32) {
        let (cell_width, cell_height) = self.cell_extent();
        (
            self.padding + (location.1 as f32 + 0.5) * cell_width,
            self.padding + (location.0 as f32 + 0.5) * cell_height,
        )
    }

    fn axis(&self, position: f32, extent: f32) -> Option<Coord> {
        let offset = position - self.padding;
        if offset < 0.0 || extent <= 0.0 || !offset.is_finite() {
            return None;
        }

        let index = (offset / extent) as Coord;
        (index < self.size).then_some(index)
    }
}

impl ResolveCell for GridGeometry {
    fn resolve(&self, x: f32, y: f32) -> Probe {
        let (cell_width, cell_height) = self.cell_extent();
        match (self.axis(y, cell_height), self.axis(x, cell_width)) {
            (Some(row), Some(col)) => Probe::Cell(Location(row, col)),
            _ => Probe::OutOfBounds,
        }
    }
}

/// An opaque 8-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Convert a hue in degrees, a saturation and a lightness in `0.0..=1.0` to RGB.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = lightness - chroma / 2.0;

        let (r, g, b) = match hue {
            h if h < 60.0 => (chroma, x, 0.0),
            h if h < 120.0 => (x, chroma, 0.0),
            h if h < 180.0 => (0.0, chroma, x),
            h if h < 240.0 => (0.0, x, chroma),
            h if h < 300.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self(channel(r), channel(g), channel(b))
    }
}

/// Colors assigned to pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    reduced_color: bool,
}

impl Palette {
    /// A palette following the display preference in `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            reduced_color: settings.reduced_color,
        }
    }

    /// The color of `pair`: shades of gray in reduced color, spread-out hues otherwise.
    pub fn color_of(&self, pair: PairId) -> Rgb {
        if self.reduced_color {
            let gray = (40 + (pair * 30) % 200) as u8;
            Rgb(gray, gray, gray)
        } else {
            Rgb::from_hsl(((pair * 47) % 360) as f32, 0.7, 0.5)
        }
    }
}

/// A terminal canvas: renders every frame to text and keeps the latest one.
///
/// Endpoints print as upper case letters, path cells as lower case letters, empty cells as `.`.
/// Unless reduced color is on, every letter is wrapped in a 24-bit ANSI color escape.
#[derive(Clone, Debug, Default)]
pub struct TextCanvas {
    palette: Palette,
    colored: bool,
    latest: String,
    redraws: usize,
}

impl TextCanvas {
    /// A canvas following the display preference in `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            palette: Palette::new(settings),
            colored: !settings.reduced_color,
            latest: String::new(),
            redraws: 0,
        }
    }

    /// The most recently drawn frame.
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// How many frames were drawn so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Render `frame` to text without storing it.
    pub fn render(&self, frame: Frame<'_>) -> String {
        if self.colored {
            Colored { frame, palette: self.palette }.to_string()
        } else {
            frame.to_string()
        }
    }
}

// a frame with every letter wrapped in the 24-bit color escape of its pair
struct Colored<'a> {
    frame: Frame<'a>,
    palette: Palette,
}

impl Display for Colored<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.frame.cells().rows() {
            for cell in row {
                let glyph = self.frame.glyph(*cell);
                match cell.pair() {
                    None => write!(f, "{glyph}")?,
                    Some(pair) => {
                        let Rgb(r, g, b) = self.palette.color_of(pair);
                        write!(f, "\x1b[38;2;{r};{g};{b}m{glyph}\x1b[0m")?;
                    }
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Canvas for TextCanvas {
    fn redraw(&mut self, frame: Frame<'_>) {
        self.latest = self.render(frame);
        self.redraws += 1;
    }
}
