use tui_candymon::core::SessionSnapshot;
use tui_candymon::term::{AdapterStatusView, CursorView, GameView, Viewport};
use tui_candymon::types::Special;

fn all_text(fb: &tui_candymon::term::FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = SessionSnapshot::default();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 8*2 by 8*1 => 16x8
    // plus border => 18x10
    let vp = Viewport::new(18, 10);
    let fb = view.render(&snap, &CursorView::default(), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_kinds_holes_and_specials() {
    let mut snap = SessionSnapshot::default();
    snap.kinds[0][0] = 0;
    snap.kinds[0][1] = 1;
    snap.kinds[2][3] = 2;
    snap.specials[2][3] = Special::LineH;

    let view = GameView::default();
    let fb = view.render(&snap, &CursorView::default(), Viewport::new(18, 10));

    // Inside border: (1,1) origin, each cell 2 chars wide.
    assert_eq!(fb.get(1, 1).unwrap().ch, '●');
    assert_eq!(fb.get(3, 1).unwrap().ch, '■');
    // A tagged cell renders its special glyph instead of the kind glyph.
    assert_eq!(fb.get(1 + 2 * 3, 1 + 2).unwrap().ch, '═');
    // Untouched cells are holes.
    assert_eq!(fb.get(1, 2).unwrap().ch, '·');
}

#[test]
fn term_view_highlights_cursor_cell() {
    let snap = SessionSnapshot::default();
    let cursor = CursorView::default();
    let view = GameView::default();
    let fb = view.render(&snap, &cursor, Viewport::new(18, 10));

    // Default cursor sits at (4,4); its background differs from a plain cell.
    let under_cursor = fb.get(1 + 2 * 4, 1 + 4).unwrap().style.bg;
    let plain = fb.get(1 + 2 * 5, 1 + 4).unwrap().style.bg;
    assert_ne!(under_cursor, plain);
}

#[test]
fn term_view_color_blind_palette_changes_piece_color() {
    let mut snap = SessionSnapshot::default();
    snap.kinds[0][0] = 0;

    let view = GameView::default();
    let normal = view.render(&snap, &CursorView::default(), Viewport::new(18, 10));

    snap.color_blind = true;
    let cb = view.render(&snap, &CursorView::default(), Viewport::new(18, 10));

    assert_ne!(
        normal.get(1, 1).unwrap().style.fg,
        cb.get(1, 1).unwrap().style.fg
    );
    assert_eq!(normal.get(1, 1).unwrap().ch, cb.get(1, 1).unwrap().ch);
}

#[test]
fn term_view_draws_hud_when_wide_enough() {
    let mut snap = SessionSnapshot::default();
    snap.score = 1234;
    snap.moves_left = 28;
    snap.streak = 3;

    let view = GameView::default();
    let fb = view.render(&snap, &CursorView::default(), Viewport::new(60, 24));

    let all = all_text(&fb);
    assert!(all.contains("SCORE"), "missing SCORE label:\n{all}");
    assert!(all.contains("1234"));
    assert!(all.contains("METER"));
    assert!(all.contains("MISSIONS"));
    assert!(all.contains("AI OFF"));
}

#[test]
fn term_view_shows_adapter_status() {
    let snap = SessionSnapshot::default();
    let status = AdapterStatusView {
        client_count: 2,
        streaming_count: 1,
        controller_id: Some(0),
    };

    let view = GameView::default();
    let mut fb = tui_candymon::term::FrameBuffer::new(0, 0);
    view.render_into_with_adapter(
        &snap,
        &CursorView::default(),
        Some(&status),
        Viewport::new(60, 24),
        &mut fb,
    );

    let all = all_text(&fb);
    assert!(all.contains("AI ON"), "missing adapter line:\n{all}");
}

#[test]
fn term_view_overlays_game_over_banner() {
    let mut snap = SessionSnapshot::default();
    snap.game_over = true;

    let view = GameView::default();
    let fb = view.render(&snap, &CursorView::default(), Viewport::new(60, 24));

    assert!(all_text(&fb).contains("GAME OVER"));
}
