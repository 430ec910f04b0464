//! GameView: maps an engine [`Snapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against snapshots directly.

use crate::core::Snapshot;
use crate::term::fb::{FrameBuffer, Rgb, Style};
use crate::types::{DisplayCell, PieceKind};

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

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot into a fresh framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = snap.cols as u16 * self.cell_w;
        let board_h = snap.rows as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.rows {
            let flashing = snap.clearing_rows.contains(&row);
            for col in 0..snap.cols {
                let (glyph, style) = if flashing {
                    ('█', flash_style())
                } else {
                    cell_appearance(snap.cell(row, col))
                };
                self.fill_cell(&mut fb, start_x, start_y, col as u16, row as u16, glyph, style);
            }
        }

        self.draw_side_panel(&mut fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        glyph: char,
        style: Style,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, amount) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("COMBO", snap.combo),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &amount.to_string(), value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        let mut next = [0u8; 4];
        fb.put_str(
            panel_x,
            y + 1,
            snap.upcoming.letter().encode_utf8(&mut next),
            value,
        );
        y = y.saturating_add(3);

        if let Some(feedback) = &snap.feedback {
            let shout = Style::plain(Rgb::new(240, 220, 80), Rgb::new(0, 0, 0)).bold();
            fb.put_str(panel_x, y, &feedback.text, shout);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, Style::default().bold());
    }
}

fn flash_style() -> Style {
    Style::plain(Rgb::new(255, 255, 255), Rgb::new(30, 30, 40)).bold()
}

fn cell_appearance(cell: DisplayCell) -> (char, Style) {
    let bg = Rgb::new(30, 30, 40);
    match cell {
        DisplayCell::Empty => ('·', Style::plain(Rgb::new(90, 90, 100), bg).dim()),
        DisplayCell::Filled(kind) => ('█', Style::plain(kind_color(kind), bg).bold()),
        DisplayCell::Ghost(kind) => ('░', Style::plain(kind_color(kind), bg).dim()),
    }
}

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}
