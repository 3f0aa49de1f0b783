//! Game construction and replay.

use tracing::debug;

use super::instance::GameInstance;
use crate::core::{
    Action, ActionRecord, ConfigError, GameRng, Party, Player, RuleResult, RuleViolation,
    RulesConfig,
};

/// Configures a [`GameInstance`].
///
/// Player count is not checked here. A table outside the configured range
/// is rejected when the game starts, so a lobby can fill up before
/// calling `advance`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    players: Vec<Player>,
    rules: RulesConfig,
    seed: Option<u64>,
    id: u64,
}

impl GameBuilder {
    /// Seat `players` in the given order. The first seat leads round 1.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            players: players.into_iter().collect(),
            rules: RulesConfig::default(),
            seed: None,
            id: 0,
        }
    }

    /// Use custom rules. Fails if they do not validate.
    pub fn rules(mut self, rules: RulesConfig) -> Result<Self, ConfigError> {
        rules.validate()?;
        self.rules = rules;
        Ok(self)
    }

    /// Fix the RNG seed. Without one the game seeds from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Identifier attached to every log line of the game.
    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Seat the players. Fails on an empty table or a repeated id.
    pub fn build(self) -> RuleResult<GameInstance> {
        let party = Party::new(self.players)?;
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        debug!(game = self.id, players = party.len(), seed = rng.seed(), "game created");
        Ok(GameInstance::from_parts(self.id, self.rules, party, rng))
    }
}

impl GameInstance {
    /// Rebuild a game by applying `records` in order.
    ///
    /// With the builder's seed set to the recorded game's seed this
    /// reproduces the spies, every round and the winner. Stops at the first
    /// record the rules reject. A non-advance record without an actor is
    /// rejected with `IllegalState`.
    pub fn replay(builder: GameBuilder, records: &[ActionRecord]) -> RuleResult<Self> {
        let mut game = builder.build()?;

        for record in records {
            match (record.actor, &record.action) {
                (_, Action::Advance) => game.advance()?,
                (Some(actor), action) => game.apply(actor, action)?,
                (None, action) => {
                    return Err(RuleViolation::IllegalState {
                        action: action.kind(),
                        phase: game.phase(),
                    })
                }
            };
        }

        Ok(game)
    }
}
