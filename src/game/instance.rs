//! The game engine.

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use super::event::GameEvent;
use super::view::{MissionReveal, PublicView, RoleView, RoundSummary, Tally};
use crate::core::{
    Action, ActionKind, ActionRecord, GameRng, Party, PartyMembers, Phase, Player, PlayerId,
    RuleResult, RuleViolation, RulesConfig,
};
use crate::rules::{MissionCard, Round, Score, Side, Vote};

/// Stream used for spy assignment. Nothing else draws from it.
const SPY_STREAM: &str = "spies";

/// One game of The Resistance.
///
/// Owns the phase, the seated party, the hidden spy set and the round
/// history. All mutators take `&mut self`; a controller that shares a game
/// between tasks must put it behind its own lock.
///
/// Rejected calls return a `RuleViolation` and change nothing.
///
/// ## Example
///
/// ```
/// use resistance_engine::core::{Phase, Player, PlayerId};
/// use resistance_engine::game::GameBuilder;
///
/// let players = (0..5).map(|i| Player::new(PlayerId(i), format!("p{i}")));
/// let mut game = GameBuilder::new(players).seed(1).build().unwrap();
///
/// game.advance().unwrap();
/// assert_eq!(game.phase(), Phase::ProposalPending);
/// assert_eq!(game.current_party_size(), Some(2));
///
/// game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)]).unwrap();
/// for i in 0..5 {
///     game.vote_party(PlayerId(i), true).unwrap();
/// }
/// assert_eq!(game.phase(), Phase::PartyVoteResults);
/// ```
#[derive(Clone, Debug)]
pub struct GameInstance {
    id: u64,
    rules: RulesConfig,
    phase: Phase,
    party: Party,
    spies: FxHashSet<PlayerId>,
    rounds: Vector<Round>,
    history: Vector<ActionRecord>,
    rng: GameRng,
}

impl GameInstance {
    pub(crate) fn from_parts(id: u64, rules: RulesConfig, party: Party, rng: GameRng) -> Self {
        Self {
            id,
            rules,
            phase: Phase::NotStarted,
            party,
            spies: FxHashSet::default(),
            rounds: Vector::new(),
            history: Vector::new(),
            rng,
        }
    }

    /// Seat `players` under the official rules with an entropy seed.
    pub fn new(players: Vec<Player>) -> RuleResult<Self> {
        super::GameBuilder::new(players).build()
    }

    // === Mutators ===

    /// Drive the game out of `NotStarted`, `PartyVoteResults` or
    /// `MissionVoteResults`.
    ///
    /// From any other phase this fails with `IllegalState`: those edges are
    /// taken by the vote methods.
    pub fn advance(&mut self) -> RuleResult<Vec<GameEvent>> {
        let events = self
            .run_advance()
            .inspect_err(|err| self.log_rejection(None, err))?;
        self.record(None, Action::Advance);
        Ok(events)
    }

    /// Leader nominates `members` for the current round's mission.
    pub fn propose_party(
        &mut self,
        actor: PlayerId,
        members: &[PlayerId],
    ) -> RuleResult<Vec<GameEvent>> {
        let events = self
            .run_propose(actor, members)
            .inspect_err(|err| self.log_rejection(Some(actor), err))?;
        self.record(Some(actor), Action::propose(members));
        Ok(events)
    }

    /// Cast a ballot on the proposed party. `true` approves.
    pub fn vote_party(&mut self, actor: PlayerId, approve: bool) -> RuleResult<Vec<GameEvent>> {
        let events = self
            .run_vote_party(actor, approve)
            .inspect_err(|err| self.log_rejection(Some(actor), err))?;
        self.record(Some(actor), Action::VoteParty(approve));
        Ok(events)
    }

    /// Play a mission card. Only spies may play `Sabotage`.
    pub fn vote_mission(
        &mut self,
        actor: PlayerId,
        card: MissionCard,
    ) -> RuleResult<Vec<GameEvent>> {
        let events = self
            .run_vote_mission(actor, card)
            .inspect_err(|err| self.log_rejection(Some(actor), err))?;
        self.record(Some(actor), Action::VoteMission(card));
        Ok(events)
    }

    /// Route a command to the matching mutator. `Advance` ignores `actor`.
    pub fn apply(&mut self, actor: PlayerId, action: &Action) -> RuleResult<Vec<GameEvent>> {
        match action {
            Action::Advance => self.advance(),
            Action::ProposeParty(members) => self.propose_party(actor, members),
            Action::VoteParty(approve) => self.vote_party(actor, *approve),
            Action::VoteMission(card) => self.vote_mission(actor, *card),
        }
    }

    fn run_advance(&mut self) -> RuleResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        match self.phase {
            Phase::NotStarted => {
                self.assign_spies()?;
                events.push(GameEvent::GameStarted {
                    spy_count: self.spies.len(),
                });
                self.next_round_or_game_over(&mut events);
            }
            Phase::PartyVoteResults => {
                let vote = self.current_vote().ok_or(self.illegal(ActionKind::Advance))?;
                if vote.outcome() {
                    let members: PartyMembers = SmallVec::from_slice(vote.members());
                    events.push(GameEvent::MissionStarted { members });
                    self.set_phase(Phase::MissionVoteInProgress, &mut events);
                } else {
                    self.rotate_leader(&mut events);
                    let round = self.current_round().ok_or(self.illegal(ActionKind::Advance))?;
                    let number = round.number();

                    if round.can_still_vote() {
                        self.set_phase(Phase::ProposalPending, &mut events);
                    } else {
                        info!(game = self.id, round = number, "vote limit reached, spies win the round");
                        events.push(GameEvent::VoteLimitReached { round: number });
                        events.push(GameEvent::RoundDecided {
                            round: number,
                            winner: Side::Spies,
                        });
                        self.next_round_or_game_over(&mut events);
                    }
                }
            }
            Phase::MissionVoteResults => {
                self.rotate_leader(&mut events);
                self.next_round_or_game_over(&mut events);
            }
            _ => return Err(self.illegal(ActionKind::Advance)),
        }

        Ok(events)
    }

    fn run_propose(&mut self, actor: PlayerId, members: &[PlayerId]) -> RuleResult<Vec<GameEvent>> {
        self.party.ensure_registered(actor)?;
        self.expect_phase(Phase::ProposalPending, ActionKind::ProposeParty)?;

        let leader = self.party.leader().id;
        if actor != leader {
            return Err(RuleViolation::NotLeader { actor, leader });
        }

        let expected = self
            .current_party_size()
            .ok_or(self.illegal(ActionKind::ProposeParty))?;
        if members.len() != expected {
            return Err(RuleViolation::WrongPartySize {
                expected,
                actual: members.len(),
            });
        }

        for (i, &member) in members.iter().enumerate() {
            self.party.ensure_registered(member)?;
            if members[..i].contains(&member) {
                return Err(RuleViolation::DuplicatePartyMember(member));
            }
        }

        let electorate = self.party.len();
        let members: PartyMembers = SmallVec::from_slice(members);
        let round = self
            .current_round_mut()
            .ok_or(RuleViolation::IllegalState {
                action: ActionKind::ProposeParty,
                phase: Phase::ProposalPending,
            })?;
        round.push_vote(Vote::new(members.clone(), electorate));

        info!(game = self.id, leader = %actor, party = ?members, "party proposed");
        let mut events = vec![GameEvent::PartyProposed {
            leader: actor,
            members,
        }];
        self.set_phase(Phase::PartyVoteInProgress, &mut events);
        Ok(events)
    }

    fn run_vote_party(&mut self, actor: PlayerId, approve: bool) -> RuleResult<Vec<GameEvent>> {
        self.party.ensure_registered(actor)?;
        self.expect_phase(Phase::PartyVoteInProgress, ActionKind::VoteParty)?;

        let phase = self.phase;
        let vote = self
            .current_round_mut()
            .and_then(Round::last_vote_mut)
            .ok_or(RuleViolation::IllegalState {
                action: ActionKind::VoteParty,
                phase,
            })?;
        vote.cast_ballot(actor, approve)?;

        let cast = vote.ballots().len();
        let expected = vote.electorate();
        let closed = vote
            .is_complete()
            .then(|| (vote.outcome(), vote.approvals(), vote.rejections()));

        debug!(
            game = self.id,
            player = %actor,
            vote = if approve { "affirmative" } else { "negative" },
            cast,
            expected,
            "party ballot cast"
        );
        let mut events = vec![GameEvent::PartyBallotCast {
            player: actor,
            cast,
            expected,
        }];

        if let Some((approved, approvals, rejections)) = closed {
            info!(
                game = self.id,
                approvals,
                rejections,
                "party vote over: party is {}",
                if approved { "appointed" } else { "rejected" }
            );
            events.push(GameEvent::PartyVoteClosed {
                approved,
                approvals,
                rejections,
            });
            self.set_phase(Phase::PartyVoteResults, &mut events);
        }

        Ok(events)
    }

    fn run_vote_mission(&mut self, actor: PlayerId, card: MissionCard) -> RuleResult<Vec<GameEvent>> {
        self.party.ensure_registered(actor)?;
        self.expect_phase(Phase::MissionVoteInProgress, ActionKind::VoteMission)?;

        let round = self
            .current_round()
            .ok_or(self.illegal(ActionKind::VoteMission))?;
        if round.mission_ballot(actor).is_some() {
            return Err(RuleViolation::DuplicateVote(actor));
        }
        if !round.mission_party().is_some_and(|p| p.contains(&actor)) {
            return Err(RuleViolation::NotPartyMember(actor));
        }
        if card.is_sabotage() && !self.spies.contains(&actor) {
            return Err(RuleViolation::IneligibleBallot(actor));
        }

        let phase = self.phase;
        let round = self.current_round_mut().ok_or(RuleViolation::IllegalState {
            action: ActionKind::VoteMission,
            phase,
        })?;
        round.cast_mission_ballot(actor, card)?;

        let cast = round.mission_ballots().len();
        let expected = round.party_size();
        let number = round.number();
        let decided = round.outcome().map(|winner| (winner, round.sabotage_count()));

        debug!(game = self.id, player = %actor, cast, expected, "mission ballot cast");
        trace!(game = self.id, player = %actor, card = ?card, "mission card");
        let mut events = vec![GameEvent::MissionBallotCast {
            player: actor,
            cast,
            expected,
        }];

        if let Some((winner, sabotage_count)) = decided {
            info!(
                game = self.id,
                round = number,
                sabotage_count,
                "round over: mission {}",
                if winner == Side::Resistance { "successful" } else { "failed" }
            );
            events.push(GameEvent::MissionClosed { sabotage_count });
            events.push(GameEvent::RoundDecided {
                round: number,
                winner,
            });
            self.set_phase(Phase::MissionVoteResults, &mut events);
        }

        Ok(events)
    }

    // === Transitions ===

    fn assign_spies(&mut self) -> RuleResult<()> {
        let count = self.party.len();
        if !self.rules.allows(count) {
            return Err(RuleViolation::InvalidPlayerCount {
                count,
                min: self.rules.min_players,
                max: self.rules.max_players,
            });
        }

        let spy_count = RulesConfig::spy_count(count);
        let mut rng = self.rng.for_context(SPY_STREAM);
        let players = self.party.players();
        self.spies = rng
            .sample_indices(count, spy_count)
            .into_iter()
            .map(|seat| players[seat].id)
            .collect();

        debug!(game = self.id, spies = ?self.spies_in_seat_order(), "spies appointed");
        Ok(())
    }

    fn rotate_leader(&mut self, events: &mut Vec<GameEvent>) {
        let leader = self.party.rotate_leader();
        debug!(game = self.id, leader = %leader, "leadership passes");
        events.push(GameEvent::LeaderChanged { leader });
    }

    /// Open the next round, or end the game if a side has enough wins.
    ///
    /// Shared by the start of the game, a finished mission and a round lost
    /// to the vote limit.
    fn next_round_or_game_over(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(winner) = self.score().winner(self.rules.win_limit) {
            self.finish(Some(winner), events);
            return;
        }

        let player_count = self.party.len();
        let index = self.rounds.len();
        let Some(party_size) = self.rules.party_size(player_count, index) else {
            warn!(game = self.id, round = index + 1, "no rounds left without a winner");
            self.finish(None, events);
            return;
        };

        let fails_required = self.rules.fails_required(player_count, index);
        let number = (index + 1) as u8;
        self.rounds.push_back(Round::new(
            number,
            party_size,
            fails_required,
            self.rules.vote_limit,
        ));

        let leader = self.party.leader().id;
        info!(game = self.id, round = number, party_size, fails_required, leader = %leader, "round begins");
        events.push(GameEvent::RoundStarted {
            round: number,
            party_size,
            fails_required,
            leader,
        });
        self.set_phase(Phase::ProposalPending, events);
    }

    fn finish(&mut self, winner: Option<Side>, events: &mut Vec<GameEvent>) {
        self.set_phase(Phase::GameOver, events);
        match winner {
            Some(side) => info!(game = self.id, "the game is over: {side} win"),
            None => info!(game = self.id, "the game is over without a winner"),
        }
        events.push(GameEvent::GameOver { winner });
    }

    fn set_phase(&mut self, to: Phase, events: &mut Vec<GameEvent>) {
        let from = self.phase;
        self.phase = to;
        info!(game = self.id, "state is now {to}");
        events.push(GameEvent::PhaseChanged { from, to });
    }

    fn record(&mut self, actor: Option<PlayerId>, action: Action) {
        let round = self.rounds.back().map_or(0, Round::number);
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(actor, action, round, sequence));
    }

    fn expect_phase(&self, phase: Phase, action: ActionKind) -> RuleResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.illegal(action))
        }
    }

    fn illegal(&self, action: ActionKind) -> RuleViolation {
        RuleViolation::IllegalState {
            action,
            phase: self.phase,
        }
    }

    fn log_rejection(&self, actor: Option<PlayerId>, err: &RuleViolation) {
        debug!(game = self.id, actor = ?actor, phase = %self.phase, error = %err, "call rejected");
    }

    fn current_round_mut(&mut self) -> Option<&mut Round> {
        if self.phase.is_running() {
            self.rounds.back_mut()
        } else {
            None
        }
    }

    // === Queries ===

    /// Identifier used in log fields.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The seed behind spy assignment. Knowing it reveals the spies, so it
    /// must stay on the server.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.party.players()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.party.len()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.party.get(id)
    }

    /// All rounds opened so far, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        if self.phase.is_running() {
            self.rounds.back()
        } else {
            None
        }
    }

    /// 1-based number of the current round.
    #[must_use]
    pub fn round_number(&self) -> Option<u8> {
        self.current_round().map(Round::number)
    }

    /// The proposal being voted on, or whose results are pending.
    #[must_use]
    pub fn current_vote(&self) -> Option<&Vote> {
        if self.phase.has_proposal() {
            self.current_round().and_then(Round::last_vote)
        } else {
            None
        }
    }

    /// The proposed party during the party vote, the approved party during
    /// the mission.
    #[must_use]
    pub fn current_party(&self) -> Option<&[PlayerId]> {
        if self.phase.has_party() {
            self.current_round()
                .and_then(Round::last_vote)
                .map(Vote::members)
        } else {
            None
        }
    }

    #[must_use]
    pub fn current_party_size(&self) -> Option<usize> {
        self.current_round().map(Round::party_size)
    }

    /// Sabotage cards needed to fail the current mission.
    #[must_use]
    pub fn current_fails_required(&self) -> Option<usize> {
        self.current_round().map(Round::fails_required)
    }

    #[must_use]
    pub fn leader(&self) -> Option<&Player> {
        if self.phase.is_running() {
            Some(self.party.leader())
        } else {
            None
        }
    }

    /// Rounds won by each side so far.
    #[must_use]
    pub fn score(&self) -> Score {
        Score::tally(self.rounds.iter().filter_map(Round::outcome))
    }

    /// The winning side, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if self.phase == Phase::GameOver {
            self.score().winner(self.rules.win_limit)
        } else {
            None
        }
    }

    /// Number of spies, once appointed.
    #[must_use]
    pub fn spy_count(&self) -> Option<usize> {
        (self.phase != Phase::NotStarted).then_some(self.spies.len())
    }

    /// Party ballots cast on the current proposal.
    #[must_use]
    pub fn party_vote_tally(&self) -> Option<Tally> {
        self.current_vote().map(|vote| Tally {
            cast: vote.ballots().len(),
            expected: vote.electorate(),
        })
    }

    /// Mission cards played in the current mission.
    #[must_use]
    pub fn mission_tally(&self) -> Option<Tally> {
        match self.phase {
            Phase::MissionVoteInProgress | Phase::MissionVoteResults => {
                self.current_round().map(|round| Tally {
                    cast: round.mission_ballots().len(),
                    expected: round.party_size(),
                })
            }
            _ => None,
        }
    }

    /// Players the current phase is waiting on, in seat order.
    #[must_use]
    pub fn awaiting(&self) -> Vec<PlayerId> {
        match self.phase {
            Phase::ProposalPending => vec![self.party.leader().id],
            Phase::PartyVoteInProgress => match self.current_vote() {
                Some(vote) => self
                    .party
                    .ids()
                    .filter(|&p| vote.ballot(p).is_none())
                    .collect(),
                None => Vec::new(),
            },
            Phase::MissionVoteInProgress => match self.current_round() {
                Some(round) => self
                    .party
                    .ids()
                    .filter(|&p| {
                        round.mission_party().is_some_and(|party| party.contains(&p))
                            && round.mission_ballot(p).is_none()
                    })
                    .collect(),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Commands `player` may issue right now.
    ///
    /// For mission members the result depends on the player's role, so only
    /// show it to that player.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        if !self.party.contains(player) {
            return Vec::new();
        }

        match self.phase {
            Phase::NotStarted | Phase::PartyVoteResults | Phase::MissionVoteResults => {
                vec![Action::Advance]
            }
            Phase::ProposalPending => {
                let size = self.current_party_size().unwrap_or(0);
                if player != self.party.leader().id || size == 0 {
                    return Vec::new();
                }
                let ids: Vec<PlayerId> = self.party.ids().collect();
                combinations(&ids, size)
                    .into_iter()
                    .map(Action::ProposeParty)
                    .collect()
            }
            Phase::PartyVoteInProgress => {
                let voted = self
                    .current_vote()
                    .map_or(true, |vote| vote.ballot(player).is_some());
                if voted {
                    Vec::new()
                } else {
                    vec![Action::VoteParty(true), Action::VoteParty(false)]
                }
            }
            Phase::MissionVoteInProgress => {
                if !self.awaiting().contains(&player) {
                    return Vec::new();
                }
                let mut actions = vec![Action::VoteMission(MissionCard::Success)];
                if self.spies.contains(&player) {
                    actions.push(Action::VoteMission(MissionCard::Sabotage));
                }
                actions
            }
            Phase::GameOver => Vec::new(),
        }
    }

    // === Secrecy ===

    /// Tell `requester` their own role.
    ///
    /// Spies also learn who the other spies are. Fails before the game has
    /// started, since nobody has a role yet.
    pub fn role_of(&self, requester: PlayerId) -> RuleResult<RoleView> {
        self.party.ensure_registered(requester)?;
        if self.phase == Phase::NotStarted {
            return Err(self.illegal(ActionKind::RevealRole));
        }

        if self.spies.contains(&requester) {
            let fellow_spies = self
                .spies_in_seat_order()
                .into_iter()
                .filter(|&p| p != requester)
                .collect();
            Ok(RoleView::Spy { fellow_spies })
        } else {
            Ok(RoleView::Resistance)
        }
    }

    /// All spies in seat order, once the game is over.
    #[must_use]
    pub fn revealed_spies(&self) -> Option<Vec<PlayerId>> {
        (self.phase == Phase::GameOver).then(|| self.spies_in_seat_order())
    }

    fn spies_in_seat_order(&self) -> Vec<PlayerId> {
        self.party
            .ids()
            .filter(|p| self.spies.contains(p))
            .collect()
    }

    /// Cards of the most recent completed mission in random order.
    ///
    /// Takes `&mut self` because every call reshuffles: it advances the
    /// game RNG's main stream. Spy assignment never reads that stream, and
    /// replay does not reproduce reveal order.
    pub fn mission_reveal(&mut self) -> Option<MissionReveal> {
        let round = self.rounds.iter().rev().find(|r| r.mission_complete())?;
        let winner = round.outcome()?;
        let number = round.number();
        let mut cards: Vec<MissionCard> = round
            .mission_ballots()
            .iter()
            .map(|&(_, card)| card)
            .collect();

        self.rng.shuffle(&mut cards);
        Some(MissionReveal {
            round: number,
            cards,
            winner,
        })
    }

    /// Snapshot of everything that is public.
    #[must_use]
    pub fn public_view(&self) -> PublicView {
        let party_ballots = (self.phase == Phase::PartyVoteResults)
            .then(|| self.current_vote().map(|v| v.ballots().to_vec()))
            .flatten();

        PublicView {
            phase: self.phase,
            players: self.party.players().to_vec(),
            round: self.round_number(),
            leader: self.leader().map(|p| p.id),
            party_size: self.current_party_size(),
            fails_required: self.current_fails_required(),
            proposals_left: self
                .current_round()
                .filter(|r| r.approved_vote().is_none())
                .map(|r| {
                    let made = r.votes().len();
                    let pending = usize::from(self.phase.has_proposal());
                    (self.rules.vote_limit + pending).saturating_sub(made)
                }),
            current_party: self.current_party().map(<[PlayerId]>::to_vec),
            party_vote: self.party_vote_tally(),
            party_ballots,
            mission_vote: self.mission_tally(),
            score: self.score(),
            rounds: self.rounds.iter().map(RoundSummary::from).collect(),
            winner: self.winner(),
            spies: self.revealed_spies(),
        }
    }
}

/// Every `size`-element subset of `ids`, preserving seat order.
fn combinations(ids: &[PlayerId], size: usize) -> Vec<PartyMembers> {
    let mut out = Vec::new();
    if size > ids.len() {
        return out;
    }

    let mut picks: Vec<usize> = (0..size).collect();
    loop {
        out.push(picks.iter().map(|&i| ids[i]).collect());

        // Advance the rightmost index that still has room.
        let Some(pos) = (0..size).rev().find(|&i| picks[i] < ids.len() - size + i) else {
            return out;
        };
        picks[pos] += 1;
        for i in pos + 1..size {
            picks[i] = picks[i - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    fn players(n: u64) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId(i), format!("p{i}")))
            .collect()
    }

    fn started(n: u64, seed: u64) -> GameInstance {
        let mut game = GameBuilder::new(players(n)).seed(seed).build().unwrap();
        game.advance().unwrap();
        game
    }

    fn everyone_votes(game: &mut GameInstance, approve: bool) {
        for i in 0..game.player_count() as u64 {
            game.vote_party(PlayerId(i), approve).unwrap();
        }
    }

    #[test]
    fn test_start_assigns_spies() {
        let game = started(7, 1);
        assert_eq!(game.phase(), Phase::ProposalPending);
        assert_eq!(game.spy_count(), Some(3));
        assert_eq!(game.round_number(), Some(1));
        assert_eq!(game.leader().map(|p| p.id), Some(PlayerId(0)));
        assert_eq!(game.current_fails_required(), Some(1));
    }

    #[test]
    fn test_start_rejects_small_table() {
        let mut game = GameBuilder::new(players(4)).seed(1).build().unwrap();
        assert_eq!(
            game.advance(),
            Err(RuleViolation::InvalidPlayerCount {
                count: 4,
                min: 5,
                max: 10
            })
        );
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.spy_count(), None);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_advance_from_driven_phases_fails() {
        let mut game = started(5, 1);
        assert_eq!(
            game.advance(),
            Err(RuleViolation::IllegalState {
                action: ActionKind::Advance,
                phase: Phase::ProposalPending
            })
        );

        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        assert!(matches!(
            game.advance(),
            Err(RuleViolation::IllegalState {
                phase: Phase::PartyVoteInProgress,
                ..
            })
        ));
    }

    #[test]
    fn test_proposal_checks() {
        let mut game = started(5, 1);

        assert_eq!(
            game.propose_party(PlayerId(9), &[PlayerId(0), PlayerId(1)]),
            Err(RuleViolation::UnregisteredPlayer(PlayerId(9)))
        );
        assert_eq!(
            game.propose_party(PlayerId(1), &[PlayerId(0), PlayerId(1)]),
            Err(RuleViolation::NotLeader {
                actor: PlayerId(1),
                leader: PlayerId(0)
            })
        );
        assert_eq!(
            game.propose_party(PlayerId(0), &[PlayerId(0)]),
            Err(RuleViolation::WrongPartySize {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(7)]),
            Err(RuleViolation::UnregisteredPlayer(PlayerId(7)))
        );
        assert_eq!(
            game.propose_party(PlayerId(0), &[PlayerId(3), PlayerId(3)]),
            Err(RuleViolation::DuplicatePartyMember(PlayerId(3)))
        );

        assert_eq!(game.phase(), Phase::ProposalPending);
        assert!(game.current_round().unwrap().votes().is_empty());
    }

    #[test]
    fn test_party_vote_closes_automatically() {
        let mut game = started(5, 1);
        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();

        for i in 0..4 {
            game.vote_party(PlayerId(i), true).unwrap();
            assert_eq!(game.phase(), Phase::PartyVoteInProgress);
        }
        assert_eq!(
            game.party_vote_tally(),
            Some(Tally {
                cast: 4,
                expected: 5
            })
        );

        let events = game.vote_party(PlayerId(4), false).unwrap();
        assert_eq!(game.phase(), Phase::PartyVoteResults);
        assert!(events.contains(&GameEvent::PartyVoteClosed {
            approved: true,
            approvals: 4,
            rejections: 1
        }));
    }

    #[test]
    fn test_double_party_vote_rejected() {
        let mut game = started(5, 1);
        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        game.vote_party(PlayerId(2), false).unwrap();

        assert_eq!(
            game.vote_party(PlayerId(2), true),
            Err(RuleViolation::DuplicateVote(PlayerId(2)))
        );
        assert_eq!(game.current_vote().unwrap().ballot(PlayerId(2)), Some(false));
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_rejected_vote_rotates_leader() {
        let mut game = started(5, 1);
        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        everyone_votes(&mut game, false);

        let events = game.advance().unwrap();
        assert_eq!(game.phase(), Phase::ProposalPending);
        assert_eq!(game.round_number(), Some(1));
        assert_eq!(game.leader().map(|p| p.id), Some(PlayerId(1)));
        assert!(events.contains(&GameEvent::LeaderChanged {
            leader: PlayerId(1)
        }));
    }

    #[test]
    fn test_mission_checks() {
        let mut game = started(5, 3);
        let resistance = game
            .players()
            .iter()
            .map(|p| p.id)
            .find(|&p| p != PlayerId(0) && !game.role_of(p).unwrap().is_spy())
            .unwrap();
        let party = vec![PlayerId(0), resistance];
        let outsider = game
            .players()
            .iter()
            .map(|p| p.id)
            .find(|p| !party.contains(p))
            .unwrap();

        game.propose_party(PlayerId(0), &party).unwrap();
        everyone_votes(&mut game, true);
        game.advance().unwrap();
        assert_eq!(game.phase(), Phase::MissionVoteInProgress);

        assert_eq!(
            game.vote_mission(outsider, MissionCard::Success),
            Err(RuleViolation::NotPartyMember(outsider))
        );
        assert_eq!(
            game.vote_mission(resistance, MissionCard::Sabotage),
            Err(RuleViolation::IneligibleBallot(resistance))
        );
        game.vote_mission(resistance, MissionCard::Success).unwrap();
        assert_eq!(
            game.vote_mission(resistance, MissionCard::Success),
            Err(RuleViolation::DuplicateVote(resistance))
        );
        assert_eq!(
            game.mission_tally(),
            Some(Tally {
                cast: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_legal_actions_follow_phase() {
        let mut game = GameBuilder::new(players(5)).seed(2).build().unwrap();
        assert_eq!(game.legal_actions(PlayerId(3)), vec![Action::Advance]);
        assert!(game.legal_actions(PlayerId(42)).is_empty());

        game.advance().unwrap();
        // C(5, 2) proposals for the leader, nothing for anyone else.
        assert_eq!(game.legal_actions(PlayerId(0)).len(), 10);
        assert!(game.legal_actions(PlayerId(1)).is_empty());
        assert_eq!(game.awaiting(), vec![PlayerId(0)]);

        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        game.vote_party(PlayerId(1), true).unwrap();
        assert!(game.legal_actions(PlayerId(1)).is_empty());
        assert_eq!(
            game.legal_actions(PlayerId(2)),
            vec![Action::VoteParty(true), Action::VoteParty(false)]
        );
        assert_eq!(
            game.awaiting(),
            vec![PlayerId(0), PlayerId(2), PlayerId(3), PlayerId(4)]
        );
    }

    #[test]
    fn test_proposals_left_until_approval() {
        let mut game = started(5, 1);
        assert_eq!(game.public_view().proposals_left, Some(5));

        game.propose_party(PlayerId(0), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        everyone_votes(&mut game, false);
        game.advance().unwrap();
        assert_eq!(game.public_view().proposals_left, Some(4));

        game.propose_party(PlayerId(1), &[PlayerId(0), PlayerId(1)])
            .unwrap();
        assert_eq!(game.public_view().proposals_left, Some(4));

        everyone_votes(&mut game, true);
        assert_eq!(game.phase(), Phase::PartyVoteResults);
        assert_eq!(game.public_view().proposals_left, None);

        game.advance().unwrap();
        assert_eq!(game.phase(), Phase::MissionVoteInProgress);
        assert_eq!(game.public_view().proposals_left, None);

        game.vote_mission(PlayerId(0), MissionCard::Success).unwrap();
        game.vote_mission(PlayerId(1), MissionCard::Success).unwrap();
        assert_eq!(game.phase(), Phase::MissionVoteResults);
        assert_eq!(game.public_view().proposals_left, None);
    }

    #[test]
    fn test_combinations() {
        let ids: Vec<PlayerId> = (0..5).map(PlayerId).collect();
        let all = combinations(&ids, 3);
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].as_slice(), &[PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert_eq!(all[9].as_slice(), &[PlayerId(2), PlayerId(3), PlayerId(4)]);
        assert_eq!(combinations(&ids, 5).len(), 1);
        assert!(combinations(&ids, 6).is_empty());
    }

    #[test]
    fn test_role_requires_start_and_registration() {
        let mut game = GameBuilder::new(players(5)).seed(2).build().unwrap();
        assert_eq!(
            game.role_of(PlayerId(0)),
            Err(RuleViolation::IllegalState {
                action: ActionKind::RevealRole,
                phase: Phase::NotStarted
            })
        );
        game.advance().unwrap();
        assert_eq!(
            game.role_of(PlayerId(11)),
            Err(RuleViolation::UnregisteredPlayer(PlayerId(11)))
        );
        assert!(game.role_of(PlayerId(0)).is_ok());
    }
}
