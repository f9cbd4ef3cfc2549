use blockfall::core::{GameSnapshot, GameState, ScriptedSource};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{GameStatus, PieceKind};

fn snapshot_with(kind: PieceKind) -> GameSnapshot {
    GameState::new(ScriptedSource::repeat(kind)).snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot_with(PieceKind::T);
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = snapshot_with(PieceKind::I);
    snap.board[19][0] = PieceKind::L.index() as u8 + 1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_hides_active_cells_above_the_board() {
    let mut snap = snapshot_with(PieceKind::T);
    snap.active.y = -1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // The T stem sits above row 0, so only its base row is drawn
    assert_eq!(fb.get(1 + 4 * 2, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 6 * 2, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 5 * 2, 0).unwrap().ch, '─');
}

#[test]
fn term_view_draws_ghost_at_landing_row() {
    let snap = snapshot_with(PieceKind::T);
    assert_eq!(snap.ghost_y, 18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1 + 4 * 2, 1 + 19).unwrap().ch, '░');
    assert_eq!(fb.get(1 + 5 * 2, 1 + 18).unwrap().ch, '░');

    let fb = GameView::default()
        .with_ghost(false)
        .render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1 + 4 * 2, 1 + 19).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot_with(PieceKind::T);
    snap.score = 1234;
    snap.lines = 10;
    snap.next = Some(PieceKind::O);

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("pause"));

    // Narrow terminals only get the board
    let fb = view.render(&snap, Viewport::new(30, 24));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_omits_next_without_preview() {
    let snap = snapshot_with(PieceKind::T);
    assert_eq!(snap.next, None);

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(!all.contains("NEXT"));
}

#[test]
fn term_view_shows_overlays() {
    let mut snap = snapshot_with(PieceKind::T);
    let view = GameView::default();

    snap.paused = true;
    let fb = view.render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("PAUSED"));

    snap.status = GameStatus::GameOver;
    let fb = view.render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
    assert!(!fb.row_text(11).contains("PAUSED"));
}

#[test]
fn term_view_render_into_reuses_and_resizes_buffer() {
    let snap = snapshot_with(PieceKind::S);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));

    let fresh = view.render(&snap, Viewport::new(40, 24));
    assert_eq!(fb, fresh);
}
