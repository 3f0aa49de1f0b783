//! Player identification and the seated party of a game.
//!
//! ## PlayerId
//!
//! Opaque identity handle supplied by the caller (a chat user id, a
//! session id, ...). The engine never interprets it.
//!
//! ## Party
//!
//! The fixed, ordered list of players at the table. Seat order is also the
//! leader rotation order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::error::{RuleResult, RuleViolation};

/// Opaque player identity.
///
/// Two players are the same player iff their ids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A participant: identity plus display name.
///
/// Equality and hashing only look at `id`; renaming a player does not make
/// them a different player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<u64> for PlayerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The players seated at one game, plus the leader cursor.
///
/// Fixed at creation. Lookups by `PlayerId` are O(1).
#[derive(Clone, Debug)]
pub struct Party {
    players: Vec<Player>,
    seats: FxHashMap<PlayerId, usize>,
    leader: usize,
}

impl Party {
    /// Seat the given players in order. The first seat leads first.
    ///
    /// Fails on an empty list or a repeated identity. The player count is
    /// not checked against the rules here; that happens when the game
    /// starts.
    pub fn new(players: Vec<Player>) -> RuleResult<Self> {
        if players.is_empty() {
            return Err(RuleViolation::InvalidPlayerCount {
                count: 0,
                min: 1,
                max: usize::MAX,
            });
        }

        let mut seats = FxHashMap::default();
        for (seat, player) in players.iter().enumerate() {
            if seats.insert(player.id, seat).is_some() {
                return Err(RuleViolation::DuplicatePlayer(player.id));
            }
        }

        Ok(Self {
            players,
            seats,
            leader: 0,
        })
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Iterate over player ids in seat order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.seats.contains_key(&id)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.seats.get(&id).copied()
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.seat_of(id).map(|seat| &self.players[seat])
    }

    /// Fail with `UnregisteredPlayer` unless `id` is seated.
    pub fn ensure_registered(&self, id: PlayerId) -> RuleResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(RuleViolation::UnregisteredPlayer(id))
        }
    }

    /// Seat index of the current leader.
    #[must_use]
    pub fn leader_index(&self) -> usize {
        self.leader
    }

    /// The current leader.
    #[must_use]
    pub fn leader(&self) -> &Player {
        &self.players[self.leader]
    }

    /// Pass leadership to the next seat, wrapping around. Returns the new
    /// leader.
    pub fn rotate_leader(&mut self) -> PlayerId {
        self.leader = (self.leader + 1) % self.players.len();
        self.players[self.leader].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(n: u64) -> Vec<Player> {
        (0..n).map(|i| Player::new(PlayerId(i), format!("p{i}"))).collect()
    }

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(7);
        assert_eq!(p.raw(), 7);
        assert_eq!(format!("{}", p), "Player 7");
        assert_eq!(PlayerId::from(7u64), p);
    }

    #[test]
    fn test_player_equality_is_identity() {
        let a = Player::new(PlayerId(1), "Alice");
        let renamed = Player::new(PlayerId(1), "Alicia");
        let b = Player::new(PlayerId(2), "Alice");

        assert_eq!(a, renamed);
        assert_ne!(a, b);
        assert_eq!(format!("{}", a), "Alice");
    }

    #[test]
    fn test_party_lookup() {
        let party = Party::new(seat(5)).unwrap();

        assert_eq!(party.len(), 5);
        assert_eq!(party.seat_of(PlayerId(3)), Some(3));
        assert_eq!(party.seat_of(PlayerId(9)), None);
        assert_eq!(party.get(PlayerId(2)).map(|p| p.name.as_str()), Some("p2"));
        assert!(party.ensure_registered(PlayerId(4)).is_ok());
        assert_eq!(
            party.ensure_registered(PlayerId(5)),
            Err(RuleViolation::UnregisteredPlayer(PlayerId(5)))
        );
    }

    #[test]
    fn test_party_rejects_duplicates() {
        let mut players = seat(5);
        players.push(Player::new(PlayerId(2), "again"));

        assert_eq!(
            Party::new(players).unwrap_err(),
            RuleViolation::DuplicatePlayer(PlayerId(2))
        );
    }

    #[test]
    fn test_party_rejects_empty() {
        assert!(matches!(
            Party::new(Vec::new()),
            Err(RuleViolation::InvalidPlayerCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_leader_rotation_wraps() {
        let mut party = Party::new(seat(5)).unwrap();
        assert_eq!(party.leader().id, PlayerId(0));

        for expected in [1, 2, 3, 4, 0, 1] {
            assert_eq!(party.rotate_leader(), PlayerId(expected));
        }
        assert_eq!(party.leader_index(), 1);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(PlayerId(42), "Eve");
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
        assert_eq!(back.name, "Eve");
    }
}
