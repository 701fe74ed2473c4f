//! Missions module - per-session goals and the one-time move bonus
//!
//! Each session rolls three missions: clear a number of pieces, make a
//! 4-match, and reach a x2 combo. The first time two of them complete, the
//! session grants bonus moves, once.
//!
//! Compatibility note: the clear mission names a kind but advances on every
//! cleared group cell regardless of kind. The named kind is flavor.

use tui_candymon_types::Kind;

use crate::rng::BoardRng;

/// What a mission asks the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionGoal {
    /// Clear pieces (named kind is cosmetic; all cleared cells count)
    ClearKind(Kind),
    /// Clear a group of 4 or more in one cycle
    FourMatch,
    /// Reach combo x2 in one cascade
    ComboTwo,
}

/// One mission with its progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mission {
    pub goal: MissionGoal,
    pub progress: u32,
    pub target: u32,
    pub done: bool,
}

impl Mission {
    fn new(goal: MissionGoal, target: u32) -> Self {
        Self {
            goal,
            progress: 0,
            target,
            done: false,
        }
    }

    fn advance(&mut self, amount: u32) {
        if self.done {
            return;
        }
        self.progress = (self.progress + amount).min(self.target);
        if self.progress >= self.target {
            self.done = true;
        }
    }

    /// Player-facing description (kinds shown 1-based)
    pub fn label(&self) -> String {
        match self.goal {
            MissionGoal::ClearKind(k) => format!("Clear 8 of kind {}", k + 1),
            MissionGoal::FourMatch => "Make one 4-match".to_string(),
            MissionGoal::ComboTwo => "Hit a x2 combo".to_string(),
        }
    }
}

impl Default for Mission {
    fn default() -> Self {
        Self::new(MissionGoal::ClearKind(0), 0)
    }
}

/// Target for the clear mission
const CLEAR_TARGET: u32 = 8;

/// The three missions of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missions {
    missions: [Mission; 3],
    rewarded: bool,
}

impl Missions {
    /// Roll fresh missions, drawing the clear mission's kind from the RNG
    pub fn generate(rng: &mut BoardRng, active_kinds: u8) -> Self {
        let kind = rng.next_range(active_kinds as u32) as Kind;
        Self {
            missions: [
                Mission::new(MissionGoal::ClearKind(kind), CLEAR_TARGET),
                Mission::new(MissionGoal::FourMatch, 1),
                Mission::new(MissionGoal::ComboTwo, 1),
            ],
            rewarded: false,
        }
    }

    /// Record one cascade cycle's clears
    ///
    /// Returns true when this update unlocked the move bonus.
    pub fn on_clear(&mut self, total_cleared: u32, four_match: bool) -> bool {
        self.missions[0].advance(total_cleared);
        if four_match {
            self.missions[1].advance(1);
        }
        self.claim_reward()
    }

    /// Record that a cascade reached combo x2
    ///
    /// Returns true when this update unlocked the move bonus.
    pub fn on_combo_two(&mut self) -> bool {
        self.missions[2].advance(1);
        self.claim_reward()
    }

    /// Grant the one-time bonus when two missions are done
    fn claim_reward(&mut self) -> bool {
        if self.rewarded {
            return false;
        }
        if self.missions.iter().filter(|m| m.done).count() >= 2 {
            self.rewarded = true;
            return true;
        }
        false
    }

    pub fn all(&self) -> &[Mission; 3] {
        &self.missions
    }

    pub fn done_count(&self) -> usize {
        self.missions.iter().filter(|m| m.done).count()
    }

    pub fn rewarded(&self) -> bool {
        self.rewarded
    }
}

/// Blank mission set for sessions that have not rolled theirs yet
impl Default for Missions {
    fn default() -> Self {
        Self {
            missions: [Mission::default(); 3],
            rewarded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Missions {
        let mut rng = BoardRng::new(1);
        Missions::generate(&mut rng, 5)
    }

    #[test]
    fn test_generate_rolls_kind_from_rng() {
        let missions = fresh();
        let [clear, four, combo] = *missions.all();

        match clear.goal {
            MissionGoal::ClearKind(kind) => assert!(kind < 5),
            other => panic!("unexpected goal {:?}", other),
        }
        assert_eq!(clear.target, 8);
        assert_eq!(four.goal, MissionGoal::FourMatch);
        assert_eq!(combo.goal, MissionGoal::ComboTwo);
        assert_eq!(missions.done_count(), 0);
        assert!(!missions.rewarded());
    }

    #[test]
    fn test_generate_deterministic() {
        let mut rng1 = BoardRng::new(42);
        let mut rng2 = BoardRng::new(42);
        assert_eq!(
            Missions::generate(&mut rng1, 5),
            Missions::generate(&mut rng2, 5)
        );
    }

    #[test]
    fn test_clear_mission_counts_all_kinds() {
        let mut missions = fresh();
        // 5 cleared cells of whatever kinds advance the clear mission by 5
        assert!(!missions.on_clear(5, false));
        assert_eq!(missions.all()[0].progress, 5);
        assert!(!missions.all()[0].done);

        // Cap at target and complete
        missions.on_clear(6, false);
        assert_eq!(missions.all()[0].progress, 8);
        assert!(missions.all()[0].done);
    }

    #[test]
    fn test_four_match_completes_at_once() {
        let mut missions = fresh();
        missions.on_clear(3, false);
        assert!(!missions.all()[1].done);
        missions.on_clear(4, true);
        assert!(missions.all()[1].done);
    }

    #[test]
    fn test_combo_two_completes() {
        let mut missions = fresh();
        missions.on_combo_two();
        assert!(missions.all()[2].done);
        assert_eq!(missions.done_count(), 1);
    }

    #[test]
    fn test_reward_unlocks_once_at_two_done() {
        let mut missions = fresh();
        assert!(!missions.on_combo_two());

        // Second completed mission unlocks the bonus
        assert!(missions.on_clear(9, true));
        assert!(missions.rewarded());

        // Completing the third mission does not grant it again
        assert!(!missions.on_clear(8, false));
        assert_eq!(missions.done_count(), 3);
    }
}
