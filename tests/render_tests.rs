//! Rendering tests - board rasterization through the facade API

use blockfall::core::Board;
use blockfall::term::{FrameBuffer, GameView, Viewport};

#[test]
fn render_paints_active_piece_blocks() {
    let board = Board::new(9);
    let view = GameView::default();
    let fb = view.render(&board, Viewport::new(80, 24));

    let blocks = count_blocks(&fb);
    // Four cells at 2x1 scale.
    assert_eq!(blocks, 8);
}

#[test]
fn render_into_reuses_the_buffer_across_frames() {
    let mut board = Board::new(9);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&board, Viewport::new(80, 24), &mut fb);
    let first = count_blocks(&fb);

    // Drop the piece one row and re-render into the same buffer.
    board.update(10_000);
    view.render_into(&board, Viewport::new(80, 24), &mut fb);

    assert_eq!(count_blocks(&fb), first);
    assert_eq!((fb.width(), fb.height()), (80, 24));
}

#[test]
fn render_adapts_to_viewport_size() {
    let board = Board::new(9);
    let view = GameView::default();

    let wide = view.render(&board, Viewport::new(120, 40));
    assert_eq!((wide.width(), wide.height()), (120, 40));
    assert_eq!(count_blocks(&wide), 8);
}

fn count_blocks(fb: &FrameBuffer) -> usize {
    let mut blocks = 0;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            if fb.get(x, y).unwrap().ch == '█' {
                blocks += 1;
            }
        }
    }
    blocks
}
