//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const KEY_HELP: [&str; 7] = [
    "<- -> move",
    "^  rotate",
    "v  soft drop",
    "SPC drop",
    "P  pause",
    "R  restart",
    "Q  quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame landed in the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardLayout {
    /// Top-left terminal position of a board cell
    pub fn cell_origin(&self, x: u16, y: u16) -> (u16, u16) {
        (
            self.frame_x + 1 + x * self.cell_w,
            self.frame_y + 1 + y * self.cell_h,
        )
    }
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_ghost: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            show_ghost: true,
        }
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        BoardLayout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, &layout, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.cell_kind(x as usize, y as usize) {
                    Some(kind) => self.draw_board_cell(fb, &layout, x, y, kind),
                    None => self.fill_cell_rect(
                        fb,
                        &layout,
                        x,
                        y,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        // Ghost piece, drawn first so the active piece covers any overlap.
        if self.show_ghost && !snap.game_over() && snap.ghost_y > snap.active.y {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for cell in snap.active.cells_at(snap.ghost_y) {
                if cell.is_visible() {
                    self.fill_cell_rect(fb, &layout, cell.x as u16, cell.y as u16, '░', ghost_style);
                }
            }
        }

        // Active piece; cells above row 0 stay hidden.
        for cell in snap.active.cells() {
            if cell.is_visible() {
                self.draw_board_cell(fb, &layout, cell.x as u16, cell.y as u16, cell.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over() {
            self.draw_overlay_text(fb, &layout, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, &layout, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = layout.cell_origin(cell_x, cell_y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &BoardLayout) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        if let Some(next) = snap.next {
            fb.put_str(panel_x, y, "NEXT", label);
            let style = CellStyle::new(piece_color(next), PANEL_BG).bold();
            for (dx, dy) in get_shape(next, Rotation::North).cells() {
                fb.fill_rect(
                    panel_x + (dx as u16) * self.cell_w,
                    y + 1 + dy as u16,
                    self.cell_w,
                    1,
                    '█',
                    style,
                );
            }
            y += 4;
        }

        let help = value.dim();
        for line in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
