//! Piece module - tetromino shapes parsed from textual templates
//!
//! Every piece is born from one of six fixed templates: a 4-row by 3-column
//! textual grid, tab-indented, where `H` marks a filled cell and `#` a blank.
//! Parsing happens once at construction; afterwards a piece is just a rigid
//! cluster of absolute grid cells plus a color, and the only thing it knows
//! how to do is translate.

use arrayvec::ArrayVec;

use blockfall_types::Rgb;

/// Absolute cell coordinate on the logical grid.
pub type CellPos = (i8, i8);

/// Marker character for a filled template cell.
const FILLED: char = 'H';

/// Upper bound on filled cells in a 3x4 template.
const MAX_TEMPLATE_CELLS: usize = 12;

/// The six shape templates, in declaration order.
pub const SHAPE_TEMPLATES: [&str; 6] = [
    "\n\t###\n\tH##\n\tH##\n\tHH#\n",
    "\n\tH##\n\tH##\n\tH##\n\tH##\n",
    "\n\tHH#\n\tHH#\n\t###\n\t###\n",
    "\n\tHH#\n\tH##\n\tH##\n\t###\n",
    "\n\tH##\n\tHH#\n\t#H#\n\t###\n",
    "\n\t###\n\t###\n\t#H#\n\tHHH\n",
];

/// A single piece: an ordered cluster of grid cells sharing one color.
///
/// `cells[0]` is the position anchor; every translation moves the anchor and
/// all cells in lockstep. The cell count never grows after construction and
/// only shrinks through row compaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    cells: ArrayVec<CellPos, MAX_TEMPLATE_CELLS>,
    position: CellPos,
    color: Rgb,
}

impl Piece {
    /// Parse a shape template into a piece at its template coordinates.
    ///
    /// Cells are collected in row-major scan order: blank lines are skipped,
    /// tabs do not advance the column counter. A template with no filled
    /// cells is a programmer error.
    pub fn from_template(template: &str, color: Rgb) -> Self {
        let mut cells: ArrayVec<CellPos, MAX_TEMPLATE_CELLS> = ArrayVec::new();
        let mut y: i8 = 0;

        for line in template.lines() {
            if line.is_empty() {
                continue;
            }
            let mut x: i8 = 0;
            for ch in line.chars() {
                if ch == '\t' {
                    continue;
                }
                if ch == FILLED {
                    cells.push((x, y));
                }
                x += 1;
            }
            y += 1;
        }

        assert!(!cells.is_empty(), "shape template has no filled cells");

        let position = cells[0];
        Self {
            cells,
            position,
            color,
        }
    }

    /// Build a piece directly from absolute cells (test fixtures only).
    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[CellPos], color: Rgb) -> Self {
        assert!(!cells.is_empty());
        let mut v: ArrayVec<CellPos, MAX_TEMPLATE_CELLS> = ArrayVec::new();
        v.try_extend_from_slice(cells).expect("too many cells");
        Self {
            position: v[0],
            cells: v,
            color,
        }
    }

    /// Current absolute cell coordinates.
    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    /// The anchor cell (the first filled cell in template scan order).
    pub fn position(&self) -> CellPos {
        self.position
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Rigidly translate every cell and the anchor by the same delta.
    ///
    /// No bounds checking at this level; the board decides whether a
    /// translation is allowed before applying it.
    pub fn translate(&mut self, dx: i8, dy: i8) {
        for cell in &mut self.cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        self.position.0 += dx;
        self.position.1 += dy;
    }

    /// Move the anchor to `pos`, carrying every cell with it.
    pub fn move_to(&mut self, pos: CellPos) {
        let dx = pos.0 - self.position.0;
        let dy = pos.1 - self.position.1;
        self.translate(dx, dy);
    }

    /// The cells this piece would occupy after translating by (dx, dy).
    pub fn translated_cells(&self, dx: i8, dy: i8) -> ArrayVec<CellPos, MAX_TEMPLATE_CELLS> {
        self.cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
    }

    /// Row compaction: drop every cell in `row`, then shift the remaining
    /// cells above it down by one.
    ///
    /// The anchor re-syncs to the new first cell so it keeps tracking
    /// `cells[0]`. A piece may end up with zero cells; it then renders
    /// nothing and collides with nothing.
    pub fn collapse_row(&mut self, row: i8) {
        self.cells.retain(|&mut (_, y)| y != row);
        for cell in &mut self.cells {
            if cell.1 < row {
                cell.1 += 1;
            }
        }
        if let Some(&first) = self.cells.first() {
            self.position = first;
        }
    }
}
