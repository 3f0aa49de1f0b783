//! Rules configuration.
//!
//! `RulesConfig::default()` is the official rule set:
//!
//! | players | r1 | r2 | r3 | r4 | r5 |
//! |---------|----|----|----|----|----|
//! | 5       | 2  | 3  | 2  | 3  | 3  |
//! | 6       | 2  | 3  | 4  | 3  | 4  |
//! | 7       | 2  | 3  | 3  | 4  | 4  |
//! | 8-10    | 3  | 4  | 4  | 5  | 5  |
//!
//! Three round wins take the game, five rejected proposals hand the round
//! to the spies, and with seven or more players the fourth mission needs
//! two sabotage cards to fail.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of missions a game can last.
pub const ROUND_COUNT: usize = 5;

/// Tunable rule constants and the party size table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Smallest allowed table.
    pub min_players: usize,

    /// Largest allowed table.
    pub max_players: usize,

    /// Round wins needed to take the game.
    pub win_limit: usize,

    /// Proposals per round before the spies win it by default.
    pub vote_limit: usize,

    /// From this many players on, `two_fail_round` needs two sabotage cards.
    pub two_fail_min_players: usize,

    /// 1-based round that may need two sabotage cards.
    pub two_fail_round: usize,

    /// Sabotage cards needed in `two_fail_round` on large tables.
    pub two_fail_sabotages: usize,

    /// Party size per round, one row per player count starting at
    /// `min_players`.
    pub party_sizes: Vec<[usize; ROUND_COUNT]>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 5,
            max_players: 10,
            win_limit: 3,
            vote_limit: 5,
            two_fail_min_players: 7,
            two_fail_round: 4,
            two_fail_sabotages: 2,
            party_sizes: vec![
                [2, 3, 2, 3, 3],
                [2, 3, 4, 3, 4],
                [2, 3, 3, 4, 4],
                [3, 4, 4, 5, 5],
                [3, 4, 4, 5, 5],
                [3, 4, 4, 5, 5],
            ],
        }
    }
}

impl RulesConfig {
    pub fn with_win_limit(mut self, limit: usize) -> Self {
        self.win_limit = limit;
        self
    }

    pub fn with_vote_limit(mut self, limit: usize) -> Self {
        self.vote_limit = limit;
        self
    }

    pub fn with_two_fail_min_players(mut self, players: usize) -> Self {
        self.two_fail_min_players = players;
        self
    }

    pub fn with_two_fail_round(mut self, round: usize) -> Self {
        self.two_fail_round = round;
        self
    }

    pub fn with_two_fail_sabotages(mut self, sabotages: usize) -> Self {
        self.two_fail_sabotages = sabotages;
        self
    }

    /// Check the table and limits for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(ConfigError::InvalidPlayerRange {
                min: self.min_players,
                max: self.max_players,
            });
        }

        let expected = self.max_players - self.min_players + 1;
        if self.party_sizes.len() != expected {
            return Err(ConfigError::MissingPartySizes {
                expected,
                found: self.party_sizes.len(),
            });
        }

        for (offset, row) in self.party_sizes.iter().enumerate() {
            let player_count = self.min_players + offset;
            if row.iter().any(|&size| size == 0 || size > player_count) {
                return Err(ConfigError::InvalidPartySizes {
                    player_count,
                    rounds: ROUND_COUNT,
                });
            }
        }

        if self.win_limit == 0 {
            return Err(ConfigError::ZeroLimit("win_limit"));
        }
        if self.vote_limit == 0 {
            return Err(ConfigError::ZeroLimit("vote_limit"));
        }
        if self.two_fail_sabotages == 0 {
            return Err(ConfigError::ZeroLimit("two_fail_sabotages"));
        }

        if !(1..=ROUND_COUNT).contains(&self.two_fail_round) {
            return Err(ConfigError::InvalidTwoFailRound {
                round: self.two_fail_round,
                rounds: ROUND_COUNT,
            });
        }
        // A mission must stay failable: the party has to be able to play
        // enough sabotage cards.
        for (offset, row) in self.party_sizes.iter().enumerate() {
            let player_count = self.min_players + offset;
            let party_size = row[self.two_fail_round - 1];
            if player_count >= self.two_fail_min_players && self.two_fail_sabotages > party_size {
                return Err(ConfigError::UnfailableMission {
                    player_count,
                    round: self.two_fail_round,
                    fails_required: self.two_fail_sabotages,
                    party_size,
                });
            }
        }
        // Five missions must always produce a winner.
        if self.win_limit > ROUND_COUNT.div_ceil(2) {
            return Err(ConfigError::WinLimitTooHigh {
                win_limit: self.win_limit,
                rounds: ROUND_COUNT,
            });
        }

        Ok(())
    }

    /// True if `player_count` is within the allowed range.
    #[must_use]
    pub fn allows(&self, player_count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&player_count)
    }

    /// Required party size for a 0-based round index.
    ///
    /// ```
    /// use resistance_engine::core::RulesConfig;
    ///
    /// let rules = RulesConfig::default();
    /// assert_eq!(rules.party_size(5, 0), Some(2));
    /// assert_eq!(rules.party_size(10, 4), Some(5));
    /// assert_eq!(rules.party_size(4, 0), None);
    /// ```
    #[must_use]
    pub fn party_size(&self, player_count: usize, round_index: usize) -> Option<usize> {
        if !self.allows(player_count) {
            return None;
        }
        self.party_sizes
            .get(player_count - self.min_players)
            .and_then(|row| row.get(round_index))
            .copied()
    }

    /// Sabotage cards needed to fail the mission of a 0-based round.
    #[must_use]
    pub fn fails_required(&self, player_count: usize, round_index: usize) -> usize {
        if player_count >= self.two_fail_min_players && round_index + 1 == self.two_fail_round {
            self.two_fail_sabotages
        } else {
            1
        }
    }

    /// One third of the table, rounded up.
    #[must_use]
    pub const fn spy_count(player_count: usize) -> usize {
        player_count.div_ceil(3)
    }
}
