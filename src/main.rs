//! Terminal Candy Mon runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Local, Utc};
use crossterm::event::{self, Event, KeyEventKind};

use tui_candymon::adapter::{
    build_observation, create_ack, create_error, Adapter, ClientCommand, ErrorCode,
    InboundPayload, LastMatch, OutboundMessage,
};
use tui_candymon::core::{JsonFileStore, Session, SessionSnapshot, SwapError};
use tui_candymon::input::{handle_key_event, should_quit};
use tui_candymon::term::{
    AdapterStatusView, BellSink, CursorView, FrameBuffer, GameView, SoundCues, TerminalRenderer,
    Viewport,
};
use tui_candymon::types::{UiAction, HINT_IDLE_MS, TICK_MS};

#[derive(Debug, Default)]
struct Options {
    daily: bool,
    chill: bool,
    fresh: bool,
    bell: bool,
    color_blind: bool,
    seed: Option<u32>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--daily" => opts.daily = true,
            "--chill" => opts.chill = true,
            "--fresh" => opts.fresh = true,
            "--bell" => opts.bell = true,
            "--color-blind" => opts.color_blind = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a value"))?;
                opts.seed = Some(value.parse()?);
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown option: {other} (try --help)"),
        }
    }

    Ok(opts)
}

fn print_usage() {
    println!("Usage: tui-candymon [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --daily        Start today's daily challenge board");
    println!("  --chill        Unlimited moves");
    println!("  --fresh        Ignore any saved session and start a new board");
    println!("  --bell         Audible terminal-bell cues");
    println!("  --color-blind  Use the color-blind palette");
    println!("  --seed <N>     Pin the board RNG seed");
    println!("  -h, --help     Print this help");
}

fn main() -> Result<()> {
    let opts = parse_args()?;

    let save_path =
        std::env::var("CANDYMON_SAVE_PATH").unwrap_or_else(|_| "candymon-save.json".to_string());
    let store = JsonFileStore::open(save_path);

    let mut session = Session::new(Box::new(store), entropy_seed());
    session.set_rng_seed(opts.seed);
    if opts.chill {
        session.set_unlimited_moves(true);
    }
    if opts.color_blind {
        session.set_color_blind(true);
    }

    let today = today_epoch_day();
    if opts.daily {
        session.start_daily(daily_seed_today(), today);
    } else if opts.fresh || !session.load_saved(today) {
        session.reset(today);
    }

    // Start the remote adapter before entering the alternate screen so its
    // startup lines land on the normal scrollback.
    let adapter = Adapter::start_from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, adapter, opts.bell);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    mut adapter: Option<Adapter>,
    bell: bool,
) -> Result<()> {
    let view = GameView::default();
    let mut cursor = CursorView::default();
    let mut cues = bell.then(|| SoundCues::new(BellSink));

    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut idle_ms: u32 = 0;
    let mut obs_seq: u64 = 0;
    let mut last_match: Option<LastMatch> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        let status = adapter.as_ref().map(|a| {
            let s = a.status();
            AdapterStatusView {
                client_count: s.client_count,
                streaming_count: s.streaming_count,
                controller_id: s.controller_id,
            }
        });
        view.render_into_with_adapter(&snap, &cursor, status.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let mut dirty = false;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if let Some(action) = handle_key_event(key) {
                        idle_ms = 0;
                        match action {
                            UiAction::Move(dir) => {
                                if let Some(next) = cursor.cursor.step(dir) {
                                    cursor.cursor = next;
                                }
                            }
                            UiAction::Select => match cursor.selected {
                                None => cursor.selected = Some(cursor.cursor),
                                Some(sel) if sel == cursor.cursor => cursor.selected = None,
                                Some(sel) if sel.is_adjacent(cursor.cursor) => {
                                    if let Some(c) = cues.as_mut() {
                                        c.play_swap();
                                    }
                                    if let Ok(report) = session.apply_swap(sel, cursor.cursor) {
                                        last_match = Some(report.into());
                                    }
                                    cursor.selected = None;
                                    cursor.hint = None;
                                    dirty = true;
                                }
                                Some(_) => cursor.selected = Some(cursor.cursor),
                            },
                            UiAction::Hint => {
                                cursor.hint = session.find_hint();
                                dirty = true;
                            }
                            UiAction::Restart => {
                                session.reset(today_epoch_day());
                                cursor.selected = None;
                                cursor.hint = None;
                                last_match = None;
                                dirty = true;
                            }
                            UiAction::Daily => {
                                session.start_daily(daily_seed_today(), today_epoch_day());
                                cursor.selected = None;
                                cursor.hint = None;
                                last_match = None;
                                dirty = true;
                            }
                            UiAction::ToggleChill => {
                                session.set_unlimited_moves(!session.unlimited_moves());
                                dirty = true;
                            }
                            UiAction::ToggleColorBlind => {
                                session.set_color_blind(!session.color_blind());
                                dirty = true;
                            }
                        }
                    }
                }
            }
        }

        // Remote control.
        if let Some(a) = adapter.as_mut() {
            while let Some(inbound) = a.try_recv() {
                match inbound.payload {
                    InboundPayload::SnapshotRequest => {
                        session.snapshot_into(&mut snap);
                        obs_seq += 1;
                        let obs =
                            build_observation(obs_seq, &snap, hint_cells(&cursor), last_match);
                        a.send(OutboundMessage::ToClientObservation {
                            client_id: inbound.client_id,
                            obs,
                        });
                    }
                    InboundPayload::Command(cmd) => {
                        match apply_remote_command(
                            session,
                            &mut cursor,
                            &mut cues,
                            &mut last_match,
                            cmd,
                        ) {
                            Ok(()) => {
                                // Ack after the command has been applied.
                                a.send(OutboundMessage::ToClientAck {
                                    client_id: inbound.client_id,
                                    ack: create_ack(inbound.seq, inbound.seq),
                                });
                                idle_ms = 0;
                                dirty = true;
                            }
                            Err(e) => {
                                a.send(OutboundMessage::ToClientError {
                                    client_id: inbound.client_id,
                                    err: create_error(inbound.seq, ErrorCode::from(e), e.message()),
                                });
                            }
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);

            idle_ms = idle_ms.saturating_add(TICK_MS);
            if idle_ms >= HINT_IDLE_MS && cursor.hint.is_none() && !session.game_over() {
                cursor.hint = session.find_hint();
                if cursor.hint.is_some() {
                    dirty = true;
                }
            }
        }

        // Session events drive sound cues and observation streaming.
        let events = session.take_events();
        if !events.is_empty() {
            dirty = true;
        }
        if let Some(c) = cues.as_mut() {
            for event in &events {
                c.on_event(event);
            }
        }

        if dirty {
            if let Some(a) = adapter.as_ref() {
                if a.status().streaming_count > 0 {
                    session.snapshot_into(&mut snap);
                    obs_seq += 1;
                    let obs = build_observation(obs_seq, &snap, hint_cells(&cursor), last_match);
                    a.send(OutboundMessage::BroadcastObservation { obs });
                }
            }
        }
    }
}

fn apply_remote_command(
    session: &mut Session,
    cursor: &mut CursorView,
    cues: &mut Option<SoundCues<BellSink>>,
    last_match: &mut Option<LastMatch>,
    cmd: ClientCommand,
) -> Result<(), SwapError> {
    match cmd {
        ClientCommand::Swap { from, to } => {
            if let Some(c) = cues.as_mut() {
                c.play_swap();
            }
            let report = session.apply_swap(from, to)?;
            *last_match = Some(report.into());
            cursor.selected = None;
            cursor.hint = None;
        }
        ClientCommand::Reset => {
            session.reset(today_epoch_day());
            cursor.selected = None;
            cursor.hint = None;
            *last_match = None;
        }
        ClientCommand::Daily => {
            session.start_daily(daily_seed_today(), today_epoch_day());
            cursor.selected = None;
            cursor.hint = None;
            *last_match = None;
        }
        ClientCommand::Chill { on } => session.set_unlimited_moves(on),
        ClientCommand::Seed { value } => session.set_rng_seed(value),
        ClientCommand::Hint => cursor.hint = session.find_hint(),
    }
    Ok(())
}

fn hint_cells(cursor: &CursorView) -> Option<[[u8; 2]; 2]> {
    cursor
        .hint
        .map(|(a, b)| [[a.row, a.col], [b.row, b.col]])
}

/// Local calendar date as a YYYYMMDD integer, shared by everyone who plays
/// the daily on the same day.
fn daily_seed_today() -> u32 {
    let today = Local::now().date_naive();
    (today.year() as u32) * 10_000 + today.month() * 100 + today.day()
}

/// Days since the Unix epoch, for streak bookkeeping.
fn today_epoch_day() -> i64 {
    Utc::now().timestamp().div_euclid(86_400)
}

fn entropy_seed() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.subsec_nanos() ^ (d.as_secs() as u32),
        Err(_) => 0x9E37_79B9,
    }
}
