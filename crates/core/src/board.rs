//! Board module - the 10x20 playfield simulation
//!
//! The board owns every piece ever spawned: the one active (falling) piece
//! and all frozen pieces, whose cells persist individually after placement.
//! The active piece is an index into the collection, so exactly one active
//! piece exists by construction and placement is a state transition rather
//! than a structural copy.
//!
//! Collision checking is a pure predicate; what happens when a descent is
//! blocked (freeze, respawn, row-clear sweep) is an explicit step taken by
//! `try_move` only for downward requests.

use blockfall_types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_INTERVAL_MS};

use crate::piece::{CellPos, Piece, SHAPE_TEMPLATES};
use crate::rng::SimpleRng;

/// The game board and everything on it.
#[derive(Debug, Clone)]
pub struct Board {
    /// Every piece on the board, frozen and active alike. Pieces are never
    /// removed; row clears remove individual cells.
    pieces: Vec<Piece>,
    /// Index of the active piece in `pieces`.
    active: usize,
    /// Countdown to the next forced descent.
    gravity_timer_ms: u32,
    rng: SimpleRng,
    game_over: bool,
}

impl Board {
    /// Create a board for one game session, with the first piece already
    /// spawned and falling.
    pub fn new(seed: u32) -> Self {
        let mut board = Self {
            pieces: Vec::new(),
            active: 0,
            gravity_timer_ms: GRAVITY_INTERVAL_MS,
            rng: SimpleRng::new(seed),
            game_over: false,
        };
        board.spawn_piece();
        board
    }

    /// All pieces, in spawn order, for rasterization.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The one piece currently subject to gravity and input.
    pub fn active(&self) -> &Piece {
        &self.pieces[self.active]
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Spawn a random piece at its template coordinates and make it active.
    ///
    /// A fresh piece overlapping settled cells ends the game; the piece still
    /// spawns so the final position stays visible.
    fn spawn_piece(&mut self) {
        let template = SHAPE_TEMPLATES[self.rng.next_range(SHAPE_TEMPLATES.len() as u32) as usize];
        let color = self.rng.next_rgb();
        let piece = Piece::from_template(template, color);

        // At spawn time every existing piece is settled, including the one
        // that just froze and still holds the active index. Overlap with any
        // of them means the stack has reached the top.
        let blocked = self
            .pieces
            .iter()
            .any(|settled| settled.cells().iter().any(|c| piece.cells().contains(c)));
        if blocked {
            self.game_over = true;
        }

        self.pieces.push(piece);
        self.active = self.pieces.len() - 1;
    }

    /// Pure occupancy predicate: may the active piece hold these cells?
    ///
    /// Rejects any overlap with another piece's cells and anything outside
    /// the logical grid. Never mutates.
    fn can_occupy(&self, cells: &[CellPos]) -> bool {
        for (i, piece) in self.pieces.iter().enumerate() {
            if i == self.active {
                continue;
            }
            for cell in piece.cells() {
                if cells.contains(cell) {
                    return false;
                }
            }
        }

        for &(x, y) in cells {
            if x < 0 || x >= BOARD_WIDTH as i8 {
                return false;
            }
            if y < 0 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
        }

        true
    }

    /// Try to translate the active piece.
    ///
    /// A rejected downward move means the piece has landed: it freezes where
    /// it is and the next piece spawns. Rejected horizontal moves are silent.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let candidate = self.active().translated_cells(dx, dy);
        if self.can_occupy(&candidate) {
            self.pieces[self.active].translate(dx, dy);
            return true;
        }

        if dy > 0 {
            self.on_blocked_descent();
        }
        false
    }

    /// A downward move failed: freeze the active piece in place, spawn the
    /// next one, then sweep for completed rows.
    ///
    /// Freezing is just the active index moving on to the new piece. The
    /// sweep runs after the spawn, so a clear also compacts the fresh piece
    /// if its cells sit above a cleared row.
    fn on_blocked_descent(&mut self) {
        self.spawn_piece();
        self.clear_completed_rows();
    }

    /// Number of occupied columns in `row`, summed across all pieces.
    fn row_fill_count(&self, row: i8) -> usize {
        self.pieces
            .iter()
            .flat_map(|piece| piece.cells())
            .filter(|&&(_, y)| y == row)
            .count()
    }

    /// Sweep every row top to bottom and clear the full ones.
    ///
    /// Clearing shifts rows above downward, so a run of consecutive full
    /// rows is handled row by row as the scan advances past it.
    fn clear_completed_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for row in 0..BOARD_HEIGHT as i8 {
            if self.row_fill_count(row) == BOARD_WIDTH as usize {
                self.clear_row(row);
                cleared += 1;
            }
        }
        cleared
    }

    /// Remove every cell in `row` from every piece, then shift all cells
    /// above the row down by one. Cells below the row are untouched.
    fn clear_row(&mut self, row: i8) {
        assert!(
            (0..BOARD_HEIGHT as i8).contains(&row),
            "row {row} out of range"
        );
        for piece in &mut self.pieces {
            piece.collapse_row(row);
        }
    }

    /// Advance timers by `elapsed_ms` and apply gravity when the countdown
    /// runs out. Returns whether the gravity step fired.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_sub(elapsed_ms);
        if self.gravity_timer_ms > 0 {
            return false;
        }

        self.try_move(0, 1);
        self.gravity_timer_ms = GRAVITY_INTERVAL_MS;
        true
    }

    /// Apply one player action. Returns whether the active piece moved.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::MoveDown => self.try_move(0, 1),
        }
    }
}
