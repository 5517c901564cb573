//! GameView: maps a game snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. The same [`Layout`]
//! used for drawing also answers hit tests for mouse input, so what the
//! player sees and what a click resolves to never drift apart.

use crate::core::{CellPos, GameSnapshot, Piece};
use crate::engine::{GridGeometry, Preview, PointerPos};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceColor, GRID_CELLS, GRID_SIZE, MAX_SHAPE_SIDE, TRAY_SLOTS};

const SLOT_GAP: u16 = 2;
const HINT: &str = "1-3 pick  arrows move  space place  r reset  q quit";

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const INVALID: Rgb = Rgb::new(220, 60, 60);
const FLASH: Rgb = Rgb::new(255, 255, 255);
const HUD: Rgb = Rgb::new(74, 222, 128);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.w && y - self.y < self.h
    }
}

/// Where everything lands for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub hud_y: u16,
    pub content: Rect,
    /// Board including its border
    pub frame: Rect,
    /// Playfield inside the border
    pub board: Rect,
    pub slots: [Rect; TRAY_SLOTS],
    pub label_y: u16,
    pub hint_y: u16,
    cell_w: u16,
    cell_h: u16,
}

impl Layout {
    /// Board size in terminal cells, for the pointer resolver
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.board.w as f32, self.board.h as f32)
    }

    /// Terminal position as a board-relative pointer at the center of the
    /// character cell. Positions left of or above the board go negative.
    pub fn pointer(&self, x: u16, y: u16) -> PointerPos {
        PointerPos::new(
            x as f32 - self.board.x as f32 + 0.5,
            y as f32 - self.board.y as f32 + 0.5,
        )
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellPos> {
        if !self.board.contains(x, y) {
            return None;
        }
        let col = (x - self.board.x) / self.cell_w;
        let row = (y - self.board.y) / self.cell_h;
        Some(CellPos::new(row as u8, col as u8))
    }

    pub fn slot_at(&self, x: u16, y: u16) -> Option<usize> {
        self.slots.iter().position(|r| r.contains(x, y))
    }
}

/// Host-side feedback drawn on top of the snapshot
#[derive(Debug, Clone)]
pub struct Decorations {
    pub preview: Option<Preview>,
    /// Row-major mask of cells flashing after a clear
    pub flash: [bool; GRID_CELLS],
    /// Slot picked by the keyboard cursor
    pub selected_slot: Option<usize>,
    /// Slot currently picked up by a mouse drag
    pub dragging_slot: Option<usize>,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            preview: None,
            flash: [false; GRID_CELLS],
            selected_slot: None,
            dragging_slot: None,
        }
    }
}

/// A lightweight terminal renderer for the block puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let side = GRID_SIZE as u16;
        let board_w = side * self.cell_w;
        let board_h = side * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let slot_w = MAX_SHAPE_SIDE as u16 * self.cell_w;
        let slot_h = MAX_SHAPE_SIDE as u16 * self.cell_h;
        let tray_w = TRAY_SLOTS as u16 * slot_w + (TRAY_SLOTS as u16 - 1) * SLOT_GAP;

        let content_w = frame_w.max(tray_w);
        // hud, gap, frame, gap, slots, labels, hint
        let content_h = 1 + 1 + frame_h + 1 + slot_h + 1 + 1;

        let start_x = viewport.width.saturating_sub(content_w) / 2;
        let start_y = viewport.height.saturating_sub(content_h) / 2;

        let frame = Rect {
            x: start_x + (content_w - frame_w) / 2,
            y: start_y + 2,
            w: frame_w,
            h: frame_h,
        };
        let board = Rect {
            x: frame.x + 1,
            y: frame.y + 1,
            w: board_w,
            h: board_h,
        };

        let tray_x = start_x + (content_w - tray_w) / 2;
        let tray_y = frame.y + frame_h + 1;
        let slots = std::array::from_fn(|i| Rect {
            x: tray_x + i as u16 * (slot_w + SLOT_GAP),
            y: tray_y,
            w: slot_w,
            h: slot_h,
        });

        Layout {
            hud_y: start_y,
            content: Rect {
                x: start_x,
                y: start_y,
                w: content_w,
                h: content_h,
            },
            frame,
            board,
            slots,
            label_y: tray_y + slot_h,
            hint_y: tray_y + slot_h + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render into an existing framebuffer, reusable across frames.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        deco: &Decorations,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::fg(Rgb::new(200, 200, 200), SCREEN_BG);

        self.draw_hud(fb, snap, &layout);

        fb.fill_rect(
            layout.board.x,
            layout.board.y,
            layout.board.w,
            layout.board.h,
            ' ',
            CellStyle::fg(Rgb::new(80, 80, 90), BOARD_BG),
        );
        self.draw_border(fb, layout.frame, border);

        for (row, cells) in snap.grid.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                let pos = CellPos::new(row as u8, col as u8);
                match PieceColor::from_code(code) {
                    Some(color) => {
                        let style = CellStyle::fg(Rgb::of_piece(color), BOARD_BG);
                        self.fill_cell(fb, &layout, pos, '█', style);
                    }
                    None => {
                        let style = CellStyle::fg(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_cell(fb, &layout, pos, '·', style);
                    }
                }
            }
        }

        if let Some(preview) = &deco.preview {
            let fg = if preview.valid {
                Rgb::of_piece(preview.color)
            } else {
                INVALID
            };
            let style = CellStyle::fg(fg, BOARD_BG);
            for &pos in &preview.cells {
                self.fill_cell(fb, &layout, pos, '▒', style);
            }
        }

        for (i, _) in deco.flash.iter().enumerate().filter(|(_, lit)| **lit) {
            let pos = CellPos::new((i / GRID_SIZE as usize) as u8, (i % GRID_SIZE as usize) as u8);
            self.fill_cell(fb, &layout, pos, '█', CellStyle::fg(FLASH, BOARD_BG).bold());
        }

        self.draw_tray(fb, snap, deco, &layout);

        let hint = CellStyle::fg(Rgb::new(120, 120, 130), SCREEN_BG).dim();
        let hint_w = HINT.chars().count() as u16;
        let hint_x = (layout.content.x + layout.content.w / 2).saturating_sub(hint_w / 2);
        fb.put_str(hint_x, layout.hint_y, HINT, hint);

        if snap.terminal {
            self.draw_game_over(fb, snap, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, deco: &Decorations, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, deco, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let style = CellStyle::fg(HUD, SCREEN_BG).bold();
        let y = layout.hud_y;
        let left = layout.content.x;

        let x = fb.put_str(left, y, "SCORE: ", style);
        fb.put_u32(x, y, snap.score, style);

        let hi_w = 4 + digit_count(snap.high_score);
        let hi_x = (left + layout.content.w).saturating_sub(hi_w);
        let x = fb.put_str(hi_x, y, "HI: ", style);
        fb.put_u32(x, y, snap.high_score, style);

        if snap.combo > 0 {
            let combo_style = CellStyle::fg(Rgb::new(245, 158, 11), SCREEN_BG).bold();
            let multiplier = snap.combo_multiplier();
            let w = 7 + digit_count(multiplier);
            let cx = left + layout.content.w.saturating_sub(w) / 2;
            let x = fb.put_str(cx, y, "COMBO x", combo_style);
            fb.put_u32(x, y, multiplier, combo_style);
        }
    }

    fn draw_tray(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, deco: &Decorations, layout: &Layout) {
        let label = CellStyle::fg(Rgb::new(160, 160, 170), SCREEN_BG);
        for (slot, rect) in layout.slots.iter().enumerate() {
            if let Some(piece) = &snap.tray[slot] {
                let dragging = deco.dragging_slot == Some(slot);
                self.draw_tray_piece(fb, piece, *rect, dragging);
            }

            let cx = rect.x + rect.w / 2;
            let digit = char::from(b'1' + slot as u8);
            if deco.selected_slot == Some(slot) {
                let style = label.bold();
                fb.put_char(cx.saturating_sub(1), layout.label_y, '[', style);
                fb.put_char(cx, layout.label_y, digit, style);
                fb.put_char(cx + 1, layout.label_y, ']', style);
            } else {
                fb.put_char(cx, layout.label_y, digit, label.dim());
            }
        }
    }

    fn draw_tray_piece(&self, fb: &mut FrameBuffer, piece: &Piece, rect: Rect, dragging: bool) {
        let piece_w = piece.width() as u16 * self.cell_w;
        let piece_h = piece.height() as u16 * self.cell_h;
        let ox = rect.x + rect.w.saturating_sub(piece_w) / 2;
        let oy = rect.y + rect.h.saturating_sub(piece_h) / 2;

        let mut style = CellStyle::fg(Rgb::of_piece(piece.color), SCREEN_BG);
        if dragging {
            style = style.dim();
        }
        let ch = if dragging { '░' } else { '█' };
        for (r, c) in piece.cells() {
            fb.fill_rect(
                ox + c as u16 * self.cell_w,
                oy + r as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                ch,
                style,
            );
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, rect: Rect, style: CellStyle) {
        let Rect { x, y, w, h } = rect;
        if w < 2 || h < 2 {
            return;
        }

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

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &Layout, pos: CellPos, ch: char, style: CellStyle) {
        let px = layout.board.x + pos.col as u16 * self.cell_w;
        let py = layout.board.y + pos.row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let plain = CellStyle::fg(Rgb::new(220, 220, 220), SCREEN_BG);
        let board = layout.board;
        let mid_y = board.y + board.h / 2;
        let top = mid_y.saturating_sub(1);

        fb.fill_rect(board.x, top, board.w, 3, ' ', plain);
        centered(fb, board, top, "GAME OVER", style);

        let score_w = 6 + digit_count(snap.score);
        let x = board.x + board.w.saturating_sub(score_w) / 2;
        let x = fb.put_str(x, top + 1, "SCORE ", plain);
        fb.put_u32(x, top + 1, snap.score, plain);

        centered(fb, board, top + 2, "press r", plain.dim());
    }
}

fn centered(fb: &mut FrameBuffer, area: Rect, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    let x = area.x + area.w.saturating_sub(w) / 2;
    fb.put_str(x, y, text, style);
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_standard_terminal() {
        let layout = GameView::default().layout(Viewport::new(80, 24));
        assert_eq!(layout.board.w, 16);
        assert_eq!(layout.board.h, 8);
        assert!(layout.hint_y < 24);
        assert!(layout.slots[2].x + layout.slots[2].w <= 80);
    }

    #[test]
    fn test_hit_testing() {
        let layout = GameView::default().layout(Viewport::new(80, 24));
        let b = layout.board;
        assert_eq!(layout.cell_at(b.x, b.y), Some(CellPos::new(0, 0)));
        assert_eq!(layout.cell_at(b.x + 3, b.y + 2), Some(CellPos::new(2, 1)));
        assert_eq!(layout.cell_at(b.x + b.w, b.y), None);

        let s = layout.slots[1];
        assert_eq!(layout.slot_at(s.x, s.y), Some(1));
        assert_eq!(layout.slot_at(b.x, b.y), None);
    }

    #[test]
    fn test_pointer_is_board_relative() {
        let layout = GameView::default().layout(Viewport::new(80, 24));
        let p = layout.pointer(layout.board.x + 4, layout.board.y + 1);
        assert_eq!(p, PointerPos::new(4.5, 1.5));
        let left = layout.pointer(layout.board.x - 1, layout.board.y);
        assert!(left.x < 0.0);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(4_294_967_295), 10);
    }
}
