//! Read-only state snapshot handed to renderers and the remote adapter.

use tui_candymon_types::{Special, GRID_SIZE, START_GOAL};

use crate::missions::Mission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub kinds: [[i8; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub specials: [[Special; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub score: u32,
    pub best: u32,
    pub moves_left: i32,
    pub level: u32,
    pub goal: u32,
    pub meter: u8,
    pub fever: bool,
    pub fever_remaining_ms: u32,
    pub streak: u32,
    pub missions: [Mission; 3],
    pub unlimited_moves: bool,
    pub color_blind: bool,
    pub game_over: bool,
    pub seed: u32,
    pub daily: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.kinds = [[-1i8; GRID_SIZE as usize]; GRID_SIZE as usize];
        self.specials = [[Special::None; GRID_SIZE as usize]; GRID_SIZE as usize];
        self.score = 0;
        self.best = 0;
        self.moves_left = 0;
        self.level = 1;
        self.goal = START_GOAL;
        self.meter = 0;
        self.fever = false;
        self.fever_remaining_ms = 0;
        self.streak = 0;
        self.missions = [Mission::default(); 3];
        self.unlimited_moves = false;
        self.color_blind = false;
        self.game_over = false;
        self.seed = 0;
        self.daily = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            kinds: [[-1i8; GRID_SIZE as usize]; GRID_SIZE as usize],
            specials: [[Special::None; GRID_SIZE as usize]; GRID_SIZE as usize],
            score: 0,
            best: 0,
            moves_left: 0,
            level: 1,
            goal: START_GOAL,
            meter: 0,
            fever: false,
            fever_remaining_ms: 0,
            streak: 0,
            missions: [Mission::default(); 3],
            unlimited_moves: false,
            color_blind: false,
            game_over: false,
            seed: 0,
            daily: false,
        }
    }
}
