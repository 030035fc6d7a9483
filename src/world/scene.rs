//! Tile grid the player walks through and the rays are cast against.
//!
//! ### Text format
//! ```text
//! # legend: one glyph per line
//! R = color 1 0.3 0.3        # r g b [a], each 0..1
//! b = texture bricks
//! _ = empty
//! ---
//! ..bR.
//! .@...
//! ```
//! `.` and space are always empty, `@` is an empty cell that marks the
//! player start.  Width is the longest row; short rows read as empty past
//! their end.

use std::{fs, io, path::Path};

use glam::{DVec2, IVec2};
use thiserror::Error;
use tracing::debug;

use super::color::Color;
use super::texture::{TextureBank, TextureId};
use super::vector::GridVecExt;

/// What a grid cell holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Color(Color),
    Texture(TextureId),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Errors raised while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: bad legend entry: {reason}")]
    BadLegend { line: usize, reason: String },

    #[error("texture `{0}` is not in the bank")]
    UnknownTexture(String),

    #[error("row {row}, column {col}: glyph `{ch}` has no legend entry")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("scene has no grid (expected `---` followed by at least one row)")]
    MissingGrid,
}

/// Separates legend from grid.
const GRID_MARKER: &str = "---";
/// Empty cell that also marks the player start.
const SPAWN_GLYPH: char = '@';

/// Scene used when the caller does not supply one.
pub const DEFAULT_SCENE: &str = "\
# flat colours
R = color 1 0.3 0.3
G = color 0.3 1 0.3
B = color 0.3 0.3 1
Y = color 1 1 0.3
# textures
b = texture bricks
c = texture checker
---
..bc.....
...b.....
.bRb.....
.........
.......G.
.....@.G.
..Y....B.
";

/// Immutable (after load) tile grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    rows: Vec<Vec<Cell>>,
    width: usize,
    spawn: Option<IVec2>,
}

impl Scene {
    /// Build a scene straight from rows; rows may differ in length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            rows,
            width,
            spawn: None,
        }
    }

    /// Parse the text format, resolving texture names against `bank`.
    pub fn parse(src: &str, bank: &TextureBank) -> Result<Self, SceneError> {
        let mut legend: Vec<(char, Cell)> = Vec::new();
        let mut lines = src.lines().enumerate();

        let mut saw_marker = false;
        for (idx, raw) in lines.by_ref() {
            let line = raw.trim();
            if line == GRID_MARKER {
                saw_marker = true;
                break;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (glyph, cell) = parse_legend_entry(line, idx + 1, bank)?;
            legend.retain(|(g, _)| *g != glyph);
            legend.push((glyph, cell));
        }
        if !saw_marker {
            return Err(SceneError::MissingGrid);
        }

        let mut grid: Vec<&str> = lines.map(|(_, l)| l.trim_end_matches('\r')).collect();
        while grid.last().is_some_and(|l| l.trim().is_empty()) {
            grid.pop();
        }
        if grid.is_empty() {
            return Err(SceneError::MissingGrid);
        }

        let mut spawn = None;
        let mut rows = Vec::with_capacity(grid.len());
        for (row, line) in grid.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => Cell::Empty,
                    SPAWN_GLYPH => {
                        spawn = Some(IVec2::new(col as i32, row as i32));
                        Cell::Empty
                    }
                    _ => legend
                        .iter()
                        .find(|(g, _)| *g == ch)
                        .map(|(_, c)| *c)
                        .ok_or(SceneError::UnknownCell { ch, row, col })?,
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        let mut scene = Self::from_rows(rows);
        scene.spawn = spawn;
        debug!(
            width = scene.width(),
            height = scene.height(),
            legend = legend.len(),
            "scene parsed"
        );
        Ok(scene)
    }

    /// Read and parse a scene file.
    pub fn load<P: AsRef<Path>>(path: P, bank: &TextureBank) -> Result<Self, SceneError> {
        let src = fs::read_to_string(path)?;
        Self::parse(&src, bank)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// `(width, height)` as a vector, handy for scaling.
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height() as f64)
    }

    /// Centre of the `@` cell, if the scene marked one.
    pub fn spawn(&self) -> Option<DVec2> {
        self.spawn.map(|c| c.as_dvec2() + DVec2::splat(0.5))
    }

    /// `0 <= p.x < width && 0 <= p.y < height`.
    #[inline]
    pub fn inside_scene(&self, p: DVec2) -> bool {
        0.0 <= p.x && p.x < self.width as f64 && 0.0 <= p.y && p.y < self.height() as f64
    }

    /// Integer form of [`inside_scene`](Self::inside_scene).
    #[inline]
    pub fn contains(&self, c: IVec2) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height()
    }

    /// Cell at `(x, y)`.  The caller bounds-checks first; an out-of-range
    /// lookup is a bug and panics.
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        assert!(
            x < self.width && y < self.height(),
            "cell ({x}, {y}) outside {}x{} scene",
            self.width,
            self.height()
        );
        self.rows[y].get(x).copied().unwrap_or(Cell::Empty)
    }

    /// Checked lookup by grid coordinate.
    #[inline]
    pub fn get(&self, c: IVec2) -> Option<Cell> {
        self.contains(c)
            .then(|| self.cell_at(c.x as usize, c.y as usize))
    }

    /// Cell under a world-space point, `None` outside the grid.
    #[inline]
    pub fn cell_at_point(&self, p: DVec2) -> Option<Cell> {
        self.get(p.cell())
    }
}

fn parse_legend_entry(
    line: &str,
    line_no: usize,
    bank: &TextureBank,
) -> Result<(char, Cell), SceneError> {
    let bad = |reason: &str| SceneError::BadLegend {
        line: line_no,
        reason: reason.to_string(),
    };

    let (lhs, rhs) = line.split_once('=').ok_or_else(|| bad("missing `=`"))?;
    let mut glyphs = lhs.trim().chars();
    let glyph = match (glyphs.next(), glyphs.next()) {
        (Some(g), None) => g,
        _ => return Err(bad("left side must be a single character")),
    };
    if matches!(glyph, '.' | ' ' | SPAWN_GLYPH) {
        return Err(bad("`.`, space and `@` are reserved"));
    }

    // trailing `# comment` is allowed on legend lines
    let rhs = rhs.split('#').next().unwrap_or_default();
    let mut words = rhs.split_whitespace();
    let cell = match words.next() {
        Some("empty") => Cell::Empty,
        Some("color") => {
            let comps = words
                .map(|w| w.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| bad(&format!("colour component: {e}")))?;
            if comps.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(bad("colour components must lie in 0..1"));
            }
            match comps[..] {
                [r, g, b] => Cell::Color(Color::new(r, g, b, 1.0)),
                [r, g, b, a] => Cell::Color(Color::new(r, g, b, a)),
                _ => return Err(bad("`color` takes 3 or 4 components")),
            }
        }
        Some("texture") => {
            let name = words.next().ok_or_else(|| bad("`texture` needs a name"))?;
            let id = bank
                .id(name)
                .ok_or_else(|| SceneError::UnknownTexture(name.to_string()))?;
            Cell::Texture(id)
        }
        Some(other) => return Err(bad(&format!("unknown cell kind `{other}`"))),
        None => return Err(bad("missing cell kind")),
    };
    Ok((glyph, cell))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
