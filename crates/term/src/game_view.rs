//! GameView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{MissionGoal, SessionSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{CellPos, Special, GRID_SIZE};

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

/// Board-local UI state owned by the terminal loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorView {
    pub cursor: CellPos,
    pub selected: Option<CellPos>,
    pub hint: Option<(CellPos, CellPos)>,
}

impl Default for CursorView {
    fn default() -> Self {
        Self {
            cursor: CellPos::new(GRID_SIZE / 2, GRID_SIZE / 2),
            selected: None,
            hint: None,
        }
    }
}

/// Remote adapter status shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub client_count: u16,
    pub streaming_count: u16,
    pub controller_id: Option<usize>,
}

/// Per-kind piece colors, extended to the full 8-kind palette from the
/// original fallback candy set.
const KIND_COLORS: [Rgb; 8] = [
    Rgb::new(255, 110, 199),
    Rgb::new(255, 209, 102),
    Rgb::new(140, 255, 154),
    Rgb::new(110, 203, 255),
    Rgb::new(214, 107, 255),
    Rgb::new(255, 143, 163),
    Rgb::new(107, 70, 193),
    Rgb::new(255, 215, 0),
];

/// Color-blind palette (the original's accessibility tints).
const KIND_COLORS_CB: [Rgb; 8] = [
    Rgb::new(31, 119, 180),
    Rgb::new(255, 127, 14),
    Rgb::new(44, 160, 44),
    Rgb::new(214, 39, 40),
    Rgb::new(148, 103, 189),
    Rgb::new(140, 86, 75),
    Rgb::new(227, 119, 194),
    Rgb::new(23, 190, 207),
];

/// Per-kind glyphs; shape variety doubles as a color-blind aid.
const KIND_GLYPHS: [char; 8] = ['●', '■', '▲', '◆', '★', '♥', '♦', '♣'];

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 110);
const SELECT_BG: Rgb = Rgb::new(120, 90, 30);
const HINT_BG: Rgb = Rgb::new(40, 90, 60);

/// Meter bar colors (fever pink / idle purple, from the original HUD).
const METER_FILL: Rgb = Rgb::new(124, 58, 237);
const METER_FILL_FEVER: Rgb = Rgb::new(255, 122, 182);

/// A lightweight terminal renderer for the match-3 board and HUD.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current session state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: &CursorView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.render_into_with_adapter(snap, cursor, None, viewport, fb);
    }

    pub fn render_into_with_adapter(
        &self,
        snap: &SessionSnapshot,
        cursor: &CursorView,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::default()));

        let board_px_w = (GRID_SIZE as u16) * self.cell_w;
        let board_px_h = (GRID_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                self.draw_board_cell(fb, snap, cursor, start_x, start_y, r, c);
            }
        }

        self.draw_hud(fb, snap, adapter, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, cursor: &CursorView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        cursor: &CursorView,
        start_x: u16,
        start_y: u16,
        r: u8,
        c: u8,
    ) {
        let bg = cell_background(cursor, r, c);
        let px = start_x + 1 + (c as u16) * self.cell_w;
        let py = start_y + 1 + (r as u16) * self.cell_h;

        let kind = snap.kinds[r as usize][c as usize];
        if kind < 0 {
            let style = CellStyle {
                fg: Rgb::new(90, 90, 100),
                bg,
                bold: false,
                dim: true,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px, py, '·', style);
            return;
        }

        let idx = (kind as usize) % KIND_GLYPHS.len();
        let palette = if snap.color_blind {
            &KIND_COLORS_CB
        } else {
            &KIND_COLORS
        };
        let glyph = match snap.specials[r as usize][c as usize] {
            Special::None => KIND_GLYPHS[idx],
            Special::LineH => '═',
            Special::LineV => '║',
            Special::Bomb => '◉',
        };

        let style = CellStyle {
            fg: palette[idx],
            bg,
            bold: true,
            dim: false,
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, glyph, style);
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let dim = CellStyle { dim: true, ..value };
        let val_x = panel_x + 7;

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(val_x, y, snap.score, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(val_x, y, snap.best, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "MOVES", label);
        if snap.unlimited_moves {
            fb.put_char(val_x, y, '∞', value);
        } else {
            fb.put_u32(val_x, y, snap.moves_left.max(0) as u32, value);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(val_x, y, snap.level, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "GOAL", label);
        fb.put_u32(val_x, y, snap.goal, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "STREAK", label);
        fb.put_u32(val_x, y, snap.streak, value);
        y = y.saturating_add(1);

        self.draw_meter_bar(fb, snap, panel_x, val_x, y, label);
        y = y.saturating_add(1);

        if snap.fever {
            fb.put_str(panel_x, y, "FEVER", label);
            let secs = snap.fever_remaining_ms / 1000;
            let tenths = (snap.fever_remaining_ms % 1000) / 100;
            let x = fb.put_u32(val_x, y, secs, value);
            fb.put_char(x, y, '.', value);
            let x = fb.put_u32(x + 1, y, tenths, value);
            fb.put_char(x, y, 's', value);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "MISSIONS", label);
        y = y.saturating_add(1);
        for m in snap.missions.iter() {
            let mark = if m.done { '✓' } else { '·' };
            fb.put_char(panel_x, y, mark, if m.done { value } else { dim });
            let x = panel_x + 2;
            let x = match m.goal {
                MissionGoal::ClearKind(k) => {
                    fb.put_str(x, y, "Clear 8 of kind ", value);
                    fb.put_u32(x + 16, y, k as u32 + 1, value)
                }
                MissionGoal::FourMatch => {
                    fb.put_str(x, y, "Make one 4-match", value);
                    x + 16
                }
                MissionGoal::ComboTwo => {
                    fb.put_str(x, y, "Hit a x2 combo", value);
                    x + 14
                }
            };
            if m.target > 1 {
                let x = fb.put_u32(x + 1, y, m.progress, dim);
                fb.put_char(x, y, '/', dim);
                fb.put_u32(x + 1, y, m.target, dim);
            }
            y = y.saturating_add(1);
        }

        if snap.daily {
            fb.put_str(panel_x, y, "DAILY", label);
            fb.put_char(val_x, y, '#', dim);
            fb.put_u32(val_x + 1, y, snap.seed, value);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "AI", label);
        if let Some(st) = adapter {
            fb.put_str(panel_x + 3, y, "ON", value);
            y = y.saturating_add(1);
            fb.put_char(panel_x, y, 'C', dim);
            let x = fb.put_u32(panel_x + 1, y, st.client_count as u32, value);
            fb.put_char(x + 1, y, 'S', dim);
            let x = fb.put_u32(x + 2, y, st.streaming_count as u32, value);
            fb.put_str(x + 1, y, "CTRL", dim);
            match st.controller_id {
                Some(id) => {
                    fb.put_u32(x + 6, y, id as u32, value);
                }
                None => fb.put_char(x + 6, y, '-', value),
            }
        } else {
            fb.put_str(panel_x + 3, y, "OFF", dim);
        }
    }

    fn draw_meter_bar(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        panel_x: u16,
        bar_x: u16,
        y: u16,
        label: CellStyle,
    ) {
        fb.put_str(panel_x, y, "METER", label);

        let fill_color = if snap.fever {
            METER_FILL_FEVER
        } else {
            METER_FILL
        };
        let filled = CellStyle {
            fg: fill_color,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let rest = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: true,
        };

        fb.put_char(bar_x, y, '[', rest);
        let segments = (snap.meter as u16) / 10;
        for i in 0..10u16 {
            let (ch, style) = if i < segments {
                ('█', filled)
            } else {
                ('░', rest)
            };
            fb.put_char(bar_x + 1 + i, y, ch, style);
        }
        fb.put_char(bar_x + 11, y, ']', rest);
    }

    fn draw_overlay_text(
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
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn cell_background(cursor: &CursorView, r: u8, c: u8) -> Rgb {
    let pos = CellPos::new(r, c);
    if cursor.selected == Some(pos) {
        return SELECT_BG;
    }
    if cursor.cursor == pos {
        return CURSOR_BG;
    }
    if let Some((a, b)) = cursor.hint {
        if a == pos || b == pos {
            return HINT_BG;
        }
    }
    BOARD_BG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionSnapshot;
    use crate::types::Special;

    // Default view at a 60x24 viewport: the 18x10 board frame starts at
    // (21, 7), board cell (r, c) lands at (22 + 2c, 8 + r) and the HUD
    // panel starts at column 41.
    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };
    const PANEL_X: u16 = 41;
    const VAL_X: u16 = 48;

    fn cell_xy(r: u8, c: u8) -> (u16, u16) {
        (22 + 2 * (c as u16), 8 + (r as u16))
    }

    fn base_snap() -> SessionSnapshot {
        let mut snap = SessionSnapshot::default();
        snap.moves_left = 28;
        snap
    }

    fn render(snap: &SessionSnapshot) -> FrameBuffer {
        GameView::default().render(snap, &CursorView::default(), VIEW)
    }

    fn text_at(fb: &FrameBuffer, x: u16, y: u16, len: u16) -> String {
        (0..len)
            .map(|dx| fb.get(x + dx, y).unwrap().ch)
            .collect()
    }

    #[test]
    fn board_glyphs_use_the_kind_palette() {
        let mut snap = base_snap();
        snap.kinds[0][0] = 0;
        snap.kinds[0][1] = 1;

        let fb = render(&snap);
        let (x0, y0) = cell_xy(0, 0);
        let c0 = fb.get(x0, y0).unwrap();
        assert_eq!(c0.ch, '●');
        assert_eq!(c0.style.fg, Rgb::new(255, 110, 199));

        let (x1, y1) = cell_xy(0, 1);
        let c1 = fb.get(x1, y1).unwrap();
        assert_eq!(c1.ch, '■');
        assert_eq!(c1.style.fg, Rgb::new(255, 209, 102));

        // Empty cells draw the dim grid dot.
        let (x2, y2) = cell_xy(0, 2);
        assert_eq!(fb.get(x2, y2).unwrap().ch, '·');
    }

    #[test]
    fn color_blind_flag_swaps_the_palette() {
        let mut snap = base_snap();
        snap.kinds[0][0] = 0;
        snap.color_blind = true;

        let fb = render(&snap);
        let (x, y) = cell_xy(0, 0);
        assert_eq!(fb.get(x, y).unwrap().style.fg, Rgb::new(31, 119, 180));
    }

    #[test]
    fn special_tags_override_the_glyph() {
        let mut snap = base_snap();
        snap.kinds[2][3] = 2;
        snap.kinds[3][3] = 2;
        snap.kinds[4][4] = 2;
        snap.specials[2][3] = Special::LineH;
        snap.specials[3][3] = Special::LineV;
        snap.specials[4][4] = Special::Bomb;

        let fb = render(&snap);
        let (x, y) = cell_xy(2, 3);
        assert_eq!(fb.get(x, y).unwrap().ch, '═');
        let (x, y) = cell_xy(3, 3);
        assert_eq!(fb.get(x, y).unwrap().ch, '║');
        let (x, y) = cell_xy(4, 4);
        assert_eq!(fb.get(x, y).unwrap().ch, '◉');
    }

    #[test]
    fn cursor_selection_and_hint_change_backgrounds() {
        let mut snap = base_snap();
        snap.kinds[0][0] = 0;
        snap.kinds[0][1] = 1;
        snap.kinds[1][0] = 2;
        snap.kinds[1][1] = 3;

        let cursor = CursorView {
            cursor: CellPos::new(0, 0),
            selected: Some(CellPos::new(0, 1)),
            hint: Some((CellPos::new(1, 0), CellPos::new(1, 1))),
        };
        let fb = GameView::default().render(&snap, &cursor, VIEW);

        let (x, y) = cell_xy(0, 0);
        assert_eq!(fb.get(x, y).unwrap().style.bg, CURSOR_BG);
        let (x, y) = cell_xy(0, 1);
        assert_eq!(fb.get(x, y).unwrap().style.bg, SELECT_BG);
        let (x, y) = cell_xy(1, 0);
        assert_eq!(fb.get(x, y).unwrap().style.bg, HINT_BG);
        let (x, y) = cell_xy(1, 1);
        assert_eq!(fb.get(x, y).unwrap().style.bg, HINT_BG);
        // Unmarked cells keep the plain board background.
        let (x, y) = cell_xy(2, 2);
        assert_eq!(fb.get(x, y).unwrap().style.bg, BOARD_BG);
    }

    #[test]
    fn selection_beats_cursor_on_the_same_cell() {
        let cursor = CursorView {
            cursor: CellPos::new(3, 3),
            selected: Some(CellPos::new(3, 3)),
            hint: None,
        };
        assert_eq!(cell_background(&cursor, 3, 3), SELECT_BG);
    }

    #[test]
    fn hud_shows_score_moves_and_goal() {
        let mut snap = base_snap();
        snap.score = 1230;
        snap.best = 9999;
        snap.goal = 850;
        snap.level = 2;

        let fb = render(&snap);
        assert_eq!(text_at(&fb, PANEL_X, 7, 5), "SCORE");
        assert_eq!(text_at(&fb, VAL_X, 7, 4), "1230");
        assert_eq!(text_at(&fb, VAL_X, 8, 4), "9999");
        assert_eq!(text_at(&fb, VAL_X, 9, 2), "28");
        assert_eq!(text_at(&fb, VAL_X, 10, 1), "2");
        assert_eq!(text_at(&fb, VAL_X, 11, 3), "850");
    }

    #[test]
    fn chill_mode_shows_infinite_moves() {
        let mut snap = base_snap();
        snap.unlimited_moves = true;
        let fb = render(&snap);
        assert_eq!(fb.get(VAL_X, 9).unwrap().ch, '∞');
    }

    #[test]
    fn meter_bar_fills_by_tens() {
        let mut snap = base_snap();
        snap.meter = 60;
        let fb = render(&snap);

        let bar = text_at(&fb, VAL_X + 1, 13, 10);
        assert_eq!(bar, "██████░░░░");
        assert_eq!(fb.get(VAL_X + 1, 13).unwrap().style.fg, METER_FILL);
    }

    #[test]
    fn fever_recolors_the_meter_and_shows_a_countdown() {
        let mut snap = base_snap();
        snap.meter = 100;
        snap.fever = true;
        snap.fever_remaining_ms = 6900;

        let fb = render(&snap);
        assert_eq!(fb.get(VAL_X + 1, 13).unwrap().style.fg, METER_FILL_FEVER);
        assert_eq!(text_at(&fb, PANEL_X, 14, 5), "FEVER");
        assert_eq!(text_at(&fb, VAL_X, 14, 4), "6.9s");
    }

    #[test]
    fn mission_rows_use_done_marks() {
        let mut snap = base_snap();
        snap.missions[0].done = true;
        snap.missions[0].progress = snap.missions[0].target;

        let fb = render(&snap);
        assert_eq!(text_at(&fb, PANEL_X, 15, 8), "MISSIONS");
        assert_eq!(fb.get(PANEL_X, 16).unwrap().ch, '✓');
        assert_eq!(fb.get(PANEL_X, 17).unwrap().ch, '·');
        assert_eq!(fb.get(PANEL_X, 18).unwrap().ch, '·');
    }

    #[test]
    fn daily_row_shows_the_seed() {
        let mut snap = base_snap();
        snap.daily = true;
        snap.seed = 20260822;

        let fb = render(&snap);
        assert_eq!(text_at(&fb, PANEL_X, 19, 5), "DAILY");
        assert_eq!(text_at(&fb, VAL_X, 19, 9), "#20260822");
    }

    #[test]
    fn adapter_status_renders_counts_and_controller() {
        let snap = base_snap();
        let status = AdapterStatusView {
            client_count: 2,
            streaming_count: 1,
            controller_id: Some(0),
        };
        let mut fb = FrameBuffer::new(VIEW.width, VIEW.height);
        GameView::default().render_into_with_adapter(
            &snap,
            &CursorView::default(),
            Some(&status),
            VIEW,
            &mut fb,
        );

        assert_eq!(text_at(&fb, PANEL_X, 20, 5), "AI ON");
        assert_eq!(text_at(&fb, PANEL_X, 21, 12), "C2 S1 CTRL 0");
    }

    #[test]
    fn game_over_overlay_is_centered_on_the_board() {
        let mut snap = base_snap();
        snap.game_over = true;
        let fb = render(&snap);
        assert_eq!(text_at(&fb, 25, 12, 9), "GAME OVER");
    }

    #[test]
    fn tiny_viewports_do_not_panic() {
        let snap = base_snap();
        for (w, h) in [(0, 0), (1, 1), (3, 2), (10, 4), (19, 11)] {
            let fb = GameView::default().render(&snap, &CursorView::default(), Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }
}
