//! Session module - manages a complete game session
//!
//! This module ties together all core components: grid, match detection,
//! cascade resolution, scoring, missions, and the persistence port. It runs
//! the swap pipeline, the fever clock, daily seeding, streak tracking, and
//! save/load.

use tui_candymon_types::{
    CellPos, FEVER_DURATION_MS, LEVEL_UP_BONUS_MOVES, METER_DECAY_INTERVAL_MS, METER_DECAY_STEP,
    METER_FEVER_RESET, METER_MAX, MISSION_BONUS_MOVES, MOVE_LIMIT, START_GOAL,
};

use crate::analysis::{ensure_playable, find_move, ReshuffleOutcome};
use crate::detect::{find_matches, MatchScan};
use crate::events::GameEvent;
use crate::grid::Grid;
use crate::missions::Missions;
use crate::resolve;
use crate::rng::BoardRng;
use crate::save::SaveState;
use crate::scoring::{active_kind_count, cycle_score, meter_gain, next_goal};
use crate::snapshot::SessionSnapshot;
use crate::store::{keys, StateStore};

/// Why a swap request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    OutOfBounds,
    NotAdjacent,
    SameCell,
    NoMatch,
    GameOver,
}

impl SwapError {
    /// Stable machine-readable code, used by the control protocol
    pub fn code(&self) -> &'static str {
        match self {
            SwapError::OutOfBounds => "out-of-bounds",
            SwapError::NotAdjacent => "not-adjacent",
            SwapError::SameCell => "same-cell",
            SwapError::NoMatch => "no-match",
            SwapError::GameOver => "game-over",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SwapError::OutOfBounds => "swap target is outside the grid",
            SwapError::NotAdjacent => "cells are not orthogonally adjacent",
            SwapError::SameCell => "cannot swap a cell with itself",
            SwapError::NoMatch => "swap would not create a match",
            SwapError::GameOver => "no moves left",
        }
    }
}

impl std::fmt::Display for SwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SwapError {}

/// What one accepted swap did, cascade included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Number of clear cycles the cascade ran
    pub steps: u32,
    /// Total cells cleared from match groups (blast sweeps not counted)
    pub cleared: u32,
    /// Score gained over the whole cascade
    pub score_gained: u32,
    pub leveled_up: bool,
    pub reshuffled: bool,
}

/// Complete session state
#[derive(Debug)]
pub struct Session {
    store: Box<dyn StateStore>,
    grid: Grid,
    /// Board RNG for fills and refills, reseeded on every reset
    rng: BoardRng,
    /// Source of per-reset seeds in free play
    seed_source: BoardRng,
    /// Seed the current board was built from
    seed: u32,
    /// Pinned seed for the next resets, set over the control protocol
    seed_override: Option<u32>,
    missions: Missions,
    score: u32,
    best: u32,
    moves_left: i32,
    level: u32,
    goal: u32,
    meter: u8,
    fever: bool,
    fever_remaining_ms: u32,
    decay_elapsed_ms: u32,
    streak: u32,
    daily: bool,
    unlimited_moves: bool,
    color_blind: bool,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a blank session over a store
    ///
    /// Best score, streak, color-blind flag and the daily flag are read back
    /// from the store. The grid stays empty until [`reset`](Self::reset) or
    /// [`load_saved`](Self::load_saved) runs.
    pub fn new(store: Box<dyn StateStore>, entropy_seed: u32) -> Self {
        let best = store.get_u32(keys::BEST).unwrap_or(0);
        let streak = store.get_u32(keys::STREAK).unwrap_or(0);
        let color_blind = store.get_bool(keys::COLOR_BLIND).unwrap_or(false);
        let daily = store.get_bool(keys::DAILY_ON).unwrap_or(false);

        Self {
            store,
            grid: Grid::new(),
            rng: BoardRng::new(entropy_seed),
            seed_source: BoardRng::new(entropy_seed),
            seed: entropy_seed,
            seed_override: None,
            missions: Missions::default(),
            score: 0,
            best,
            moves_left: MOVE_LIMIT,
            level: 1,
            goal: START_GOAL,
            meter: 0,
            fever: false,
            fever_remaining_ms: 0,
            decay_elapsed_ms: 0,
            streak,
            daily,
            unlimited_moves: false,
            color_blind,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn moves_left(&self) -> i32 {
        self.moves_left
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn meter(&self) -> u8 {
        self.meter
    }

    pub fn fever(&self) -> bool {
        self.fever
    }

    pub fn fever_remaining_ms(&self) -> u32 {
        self.fever_remaining_ms
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn daily(&self) -> bool {
        self.daily
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn unlimited_moves(&self) -> bool {
        self.unlimited_moves
    }

    pub fn color_blind(&self) -> bool {
        self.color_blind
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn missions(&self) -> &Missions {
        &self.missions
    }

    /// Start a fresh board in the current mode
    ///
    /// `today` is the current day as days since the Unix epoch; it drives the
    /// streak update. Score, moves, level, goal, meter, fever and missions
    /// all reset. Best and streak carry over through the store.
    pub fn reset(&mut self, today: i64) {
        self.store.remove(keys::SAVE);
        let seed = self.pick_seed();
        self.seed = seed;
        self.rng = BoardRng::new(seed);
        self.score = 0;
        self.moves_left = MOVE_LIMIT;
        self.level = 1;
        self.goal = START_GOAL;
        self.meter = 0;
        self.fever = false;
        self.fever_remaining_ms = 0;
        self.decay_elapsed_ms = 0;
        self.game_over = false;

        let active = self.active_kinds();
        self.grid.fill_constructive(&mut self.rng, active);
        self.missions = Missions::generate(&mut self.rng, active);
        if ensure_playable(&mut self.grid, &mut self.rng, active) != ReshuffleOutcome::AlreadyPlayable
        {
            self.push(GameEvent::Reshuffled);
        }
        self.update_streak(today);

        self.push(GameEvent::ScoreChanged(self.score));
        self.push(GameEvent::MovesChanged(self.moves_left));
        self.push(GameEvent::MeterChanged(self.meter));
        self.push(GameEvent::MissionsChanged(*self.missions.all()));
    }

    /// Switch to the daily challenge for `seed` and start its board
    ///
    /// The seed persists, so every reset on the same day rebuilds the same
    /// board.
    pub fn start_daily(&mut self, seed: u32, today: i64) {
        self.store.set_bool(keys::DAILY_ON, true);
        self.store.set_u32(keys::DAILY_SEED, seed);
        self.daily = true;
        self.reset(today);
    }

    /// Pin the board seed for future resets, or unpin with `None`
    pub fn set_rng_seed(&mut self, seed: Option<u32>) {
        self.seed_override = seed;
    }

    /// Toggle chill mode: swaps stop consuming moves
    pub fn set_unlimited_moves(&mut self, on: bool) {
        self.unlimited_moves = on;
    }

    pub fn set_color_blind(&mut self, on: bool) {
        self.color_blind = on;
        self.store.set_bool(keys::COLOR_BLIND, on);
    }

    /// Restore the saved board and progress, if a valid save exists
    ///
    /// Returns false and leaves the session untouched when there is no save
    /// or it fails shape validation. A restored board with holes settles
    /// (collapse and refill) before play.
    pub fn load_saved(&mut self, today: i64) -> bool {
        let Some(raw) = self.store.get_raw(keys::SAVE) else {
            return false;
        };
        let Some(save) = SaveState::decode(&raw) else {
            return false;
        };
        let Some(grid) = Grid::from_kinds_i8(&save.grid_kinds) else {
            return false;
        };

        let seed = self.pick_seed();
        self.seed = seed;
        self.rng = BoardRng::new(seed);
        self.grid = grid;
        self.score = save.score;
        self.moves_left = save.moves_left;
        self.level = save.level;
        self.goal = save.goal;
        self.meter = 0;
        self.fever = false;
        self.fever_remaining_ms = 0;
        self.decay_elapsed_ms = 0;
        self.game_over = false;

        let active = self.active_kinds();
        if !self.grid.is_full() {
            self.grid.collapse_columns();
            self.grid.refill(&mut self.rng, active);
        }
        self.missions = Missions::generate(&mut self.rng, active);
        if ensure_playable(&mut self.grid, &mut self.rng, active) != ReshuffleOutcome::AlreadyPlayable
        {
            self.push(GameEvent::Reshuffled);
        }
        self.update_streak(today);

        self.push(GameEvent::ScoreChanged(self.score));
        self.push(GameEvent::MovesChanged(self.moves_left));
        self.push(GameEvent::MeterChanged(self.meter));
        self.push(GameEvent::MissionsChanged(*self.missions.all()));
        true
    }

    /// Swap two cells and run the cascade to completion
    ///
    /// A swap that creates no match is reverted and consumes nothing. An
    /// accepted swap consumes one move (unless moves are unlimited), clears
    /// until the board settles, then checks move exhaustion and board
    /// playability.
    pub fn apply_swap(&mut self, a: CellPos, b: CellPos) -> Result<CascadeReport, SwapError> {
        if self.game_over {
            return Err(SwapError::GameOver);
        }
        if !a.in_bounds() || !b.in_bounds() {
            return Err(SwapError::OutOfBounds);
        }
        if a == b {
            return Err(SwapError::SameCell);
        }
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent);
        }

        self.grid.swap_cells(a, b);
        let scan = find_matches(&self.grid);
        if scan.is_empty() {
            self.grid.swap_cells(a, b);
            return Err(SwapError::NoMatch);
        }

        if !self.unlimited_moves {
            self.moves_left -= 1;
            self.push(GameEvent::MovesChanged(self.moves_left));
        }

        let mut report = self.run_cascade(scan);

        if !self.unlimited_moves && self.moves_left <= 0 {
            self.game_over = true;
            self.push(GameEvent::GameOver {
                score: self.score,
                best: self.best,
            });
        } else {
            let active = self.active_kinds();
            if ensure_playable(&mut self.grid, &mut self.rng, active)
                != ReshuffleOutcome::AlreadyPlayable
            {
                report.reshuffled = true;
                self.push(GameEvent::Reshuffled);
            }
        }
        self.save();
        Ok(report)
    }

    /// Advance the fever countdown and the idle meter decay
    pub fn tick(&mut self, elapsed_ms: u32) {
        // Decay boundaries crossed in this span count against the fever
        // state it began with.
        self.decay_elapsed_ms += elapsed_ms;
        while self.decay_elapsed_ms >= METER_DECAY_INTERVAL_MS {
            self.decay_elapsed_ms -= METER_DECAY_INTERVAL_MS;
            if !self.fever && self.meter > 0 {
                self.meter = self.meter.saturating_sub(METER_DECAY_STEP);
                self.push(GameEvent::MeterChanged(self.meter));
            }
        }

        if self.fever {
            if self.fever_remaining_ms > elapsed_ms {
                self.fever_remaining_ms -= elapsed_ms;
            } else {
                self.fever_remaining_ms = 0;
                self.fever = false;
                self.meter = METER_FEVER_RESET;
                self.push(GameEvent::FeverEnded);
                self.push(GameEvent::MeterChanged(self.meter));
            }
        }
    }

    /// First available move in scan order, for hints
    pub fn find_hint(&self) -> Option<(CellPos, CellPos)> {
        find_move(&self.grid)
    }

    /// Persist the board and progress into the save slot
    pub fn save(&mut self) {
        let state = SaveState {
            grid_kinds: self.grid.kinds_i8(),
            score: self.score,
            moves_left: self.moves_left,
            level: self.level,
            goal: self.goal,
        };
        if let Ok(raw) = state.encode() {
            self.store.set_raw(keys::SAVE, &raw);
        }
    }

    /// Drain the queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.kinds = self.grid.kinds_i8();
        out.specials = self.grid.specials();
        out.score = self.score;
        out.best = self.best;
        out.moves_left = self.moves_left;
        out.level = self.level;
        out.goal = self.goal;
        out.meter = self.meter;
        out.fever = self.fever;
        out.fever_remaining_ms = self.fever_remaining_ms;
        out.streak = self.streak;
        out.missions = *self.missions.all();
        out.unlimited_moves = self.unlimited_moves;
        out.color_blind = self.color_blind;
        out.game_over = self.game_over;
        out.seed = self.seed;
        out.daily = self.daily;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Run clear cycles until no match remains
    ///
    /// Each cycle: arm proposed specials, fire the armed ones sitting on
    /// match cells, clear the groups, update missions, charge the meter,
    /// score with the combo multiplier, check the goal, then drop and
    /// refill. The combo counter starts at 1 and grows by one per cycle.
    fn run_cascade(&mut self, first: MatchScan) -> CascadeReport {
        let mut report = CascadeReport::default();
        let score_before = self.score;
        let mut scan = first;
        let mut combo: u32 = 1;

        loop {
            report.steps += 1;
            resolve::apply_tags(&mut self.grid, &scan.tags);
            let blast = resolve::fire_specials(&mut self.grid, &scan.groups);
            let cleared = resolve::clear_groups(&mut self.grid, &scan.groups);
            report.cleared += cleared;

            let missions_before = *self.missions.all();
            let bonus = self.missions.on_clear(cleared, scan.has_four_run());
            if *self.missions.all() != missions_before {
                self.push(GameEvent::MissionsChanged(*self.missions.all()));
            }
            if bonus {
                self.grant_mission_bonus();
            }

            self.add_meter(meter_gain(cleared, combo));
            self.score += cycle_score(cleared, combo, self.fever);
            self.push(GameEvent::ScoreChanged(self.score));
            if self.score > self.best {
                self.best = self.score;
                self.store.set_u32(keys::BEST, self.best);
            }
            if self.score >= self.goal {
                self.level += 1;
                self.goal = next_goal(self.goal);
                self.moves_left += LEVEL_UP_BONUS_MOVES;
                report.leveled_up = true;
                self.push(GameEvent::LevelUp {
                    level: self.level,
                    goal: self.goal,
                });
                self.push(GameEvent::MovesChanged(self.moves_left));
            }

            // Refill draws after a level-up already use the wider kind range
            let active = self.active_kinds();
            let moved = self.grid.collapse_columns();
            let filled = self.grid.refill(&mut self.rng, active);
            self.push(GameEvent::MatchCleared {
                cleared,
                combo,
                lines_fired: blast.lines_fired,
                bombs_fired: blast.bombs_fired,
                dropped: moved + filled,
            });

            if combo == 2 {
                let missions_before = *self.missions.all();
                let bonus = self.missions.on_combo_two();
                if *self.missions.all() != missions_before {
                    self.push(GameEvent::MissionsChanged(*self.missions.all()));
                }
                if bonus {
                    self.grant_mission_bonus();
                }
            }
            combo += 1;

            scan = find_matches(&self.grid);
            if scan.is_empty() {
                break;
            }
        }

        report.score_gained = self.score - score_before;
        report
    }

    fn grant_mission_bonus(&mut self) {
        self.moves_left += MISSION_BONUS_MOVES;
        self.push(GameEvent::MissionBonus {
            moves: MISSION_BONUS_MOVES,
        });
        self.push(GameEvent::MovesChanged(self.moves_left));
    }

    fn add_meter(&mut self, gain: u32) {
        let next = ((self.meter as u32 + gain).min(METER_MAX as u32)) as u8;
        if next != self.meter {
            self.meter = next;
            self.push(GameEvent::MeterChanged(self.meter));
        }
        if !self.fever && self.meter >= METER_MAX {
            self.fever = true;
            self.fever_remaining_ms = FEVER_DURATION_MS;
            self.push(GameEvent::FeverStarted);
        }
    }

    /// Seed for the next board: pinned seed, then the daily seed, then a
    /// fresh draw from the entropy stream
    fn pick_seed(&mut self) -> u32 {
        if let Some(seed) = self.seed_override {
            return seed;
        }
        if self.daily {
            if let Some(seed) = self.store.get_u32(keys::DAILY_SEED) {
                return seed;
            }
        }
        self.seed_source.next_u32()
    }

    /// Streak bookkeeping against the stored last play day
    ///
    /// First play starts at 1, the next calendar day extends by 1, a gap of
    /// two or more days resets to 1, and the same day leaves it alone.
    fn update_streak(&mut self, today: i64) {
        let last = self.store.get_i64(keys::LAST_PLAY_DAY).unwrap_or(0);
        let mut streak = self.store.get_u32(keys::STREAK).unwrap_or(0);
        if last == 0 {
            streak = 1;
        } else {
            let gap = today - last;
            if gap == 1 {
                streak += 1;
            } else if gap >= 2 {
                streak = 1;
            }
        }
        self.store.set_i64(keys::LAST_PLAY_DAY, today);
        self.store.set_u32(keys::STREAK, streak);
        if streak != self.streak {
            self.streak = streak;
            self.push(GameEvent::StreakChanged(streak));
        }
    }

    fn active_kinds(&self) -> u8 {
        active_kind_count(self.level)
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
