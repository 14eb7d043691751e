// This file is part of madness-bracket.
//
// madness-bracket is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// madness-bracket is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Turns votes into bracket progress.
//!
//! A matchup is decided only once every participant has voted. The entrant
//! with the most votes wins, ties go to the lower seed. The winner moves into
//! the next round, and the next round opens once every matchup of the
//! current round is decided.

use std::{cmp::Reverse, fmt};

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::{
    VOTERS,
    character::CharacterId,
    error::{BracketError, Entity},
    matchup::{MatchupId, MatchupPatch, round_name},
    status::Status,
    tournament::Tournament,
    vote::Choices,
};

/// The result of a vote that was accepted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteOutcome {
    /// Still waiting on other participants.
    Pending { votes_in: usize, total_needed: usize },
    /// This vote completed the matchup. `champion` is set when it was the
    /// final.
    Decided { winner: CharacterId, champion: bool },
}

impl VoteOutcome {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Decided { .. })
    }

    #[must_use]
    pub fn winner(&self) -> Option<CharacterId> {
        match self {
            Self::Pending { .. } => None,
            Self::Decided { winner, .. } => Some(*winner),
        }
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending {
                votes_in,
                total_needed,
            } => write!(f, "pending {votes_in} {total_needed}"),
            Self::Decided {
                winner,
                champion: false,
            } => write!(f, "decided {winner}"),
            Self::Decided {
                winner,
                champion: true,
            } => write!(f, "champion {winner}"),
        }
    }
}

/// Counts the votes each character received.
#[must_use]
pub fn tally(choices: &Choices) -> FxHashMap<CharacterId, usize> {
    let mut counts = FxHashMap::default();

    for character in choices.values() {
        *counts.entry(*character).or_default() += 1;
    }

    counts
}

impl Tournament {
    /// Records the vote and advances the bracket as far as it now goes.
    ///
    /// Either the whole vote applies, including any decision, propagation,
    /// and unlocking it causes, or nothing does.
    ///
    /// # Errors
    ///
    /// If the bracket is not seeded, or [`Tournament::record_vote`] rejects
    /// the vote.
    pub fn cast_vote(
        &mut self,
        matchup: MatchupId,
        participant: &str,
        character: CharacterId,
    ) -> Result<VoteOutcome, BracketError> {
        if !self.is_seeded() {
            return Err(BracketError::NotSeeded);
        }

        let mut next = self.clone();
        let outcome = next.advance(matchup, participant, character)?;
        *self = next;

        Ok(outcome)
    }

    fn advance(
        &mut self,
        matchup_id: MatchupId,
        participant: &str,
        character: CharacterId,
    ) -> Result<VoteOutcome, BracketError> {
        let mut choices = self.record_vote(matchup_id, participant, character)?;
        // Count the vote just cast no matter what the ledger read back.
        choices.insert(participant.to_string(), character);

        if choices.len() < VOTERS {
            return Ok(VoteOutcome::Pending {
                votes_in: choices.len(),
                total_needed: VOTERS,
            });
        }

        let winner = self.resolve(matchup_id, &tally(&choices))?;
        let matchup = self
            .patch_matchup(matchup_id, MatchupPatch::decide(winner))?
            .clone();

        info!(
            "{} matchup {} (round {} position {}) decided: {winner} wins",
            round_name(matchup.round).unwrap_or_default(),
            matchup.id,
            matchup.round,
            matchup.position,
        );

        let Some((round, position, slot)) = matchup.next() else {
            if let Some(champion) = self.character(winner) {
                info!("{} is the champion", champion.name);
            }

            return Ok(VoteOutcome::Decided {
                winner,
                champion: true,
            });
        };

        let target = self
            .matchup_at(round, position)
            .map(|matchup| matchup.id)
            .ok_or(BracketError::NotFound(Entity::Position { round, position }))?;

        self.patch_matchup(target, MatchupPatch::fill(slot, winner))?;
        debug!("{winner} advances to the {slot} of matchup {target}");

        self.unlock_after(matchup.round)?;

        Ok(VoteOutcome::Decided {
            winner,
            champion: false,
        })
    }

    /// The character with the most votes. Ties go to the lowest seed.
    fn resolve(
        &self,
        matchup: MatchupId,
        counts: &FxHashMap<CharacterId, usize>,
    ) -> Result<CharacterId, BracketError> {
        let mut best: Option<((usize, Reverse<u8>), CharacterId)> = None;

        for (character, count) in counts {
            let seed = self
                .character(*character)
                .map(|character| character.seed)
                .ok_or(BracketError::NotFound(Entity::Character(*character)))?;

            let key = (*count, Reverse(seed));
            if best.is_none_or(|(best_key, _)| key > best_key) {
                best = Some((key, *character));
            }
        }

        best.map(|(_, character)| character)
            .ok_or(BracketError::InvalidState {
                matchup,
                status: Status::Active,
            })
    }

    /// Opens every full matchup of the next round once all of `round` is
    /// decided. Returns the matchups it opened.
    fn unlock_after(&mut self, round: u8) -> Result<Vec<MatchupId>, BracketError> {
        let decided = self
            .round(round)
            .iter()
            .all(|matchup| matchup.status == Status::Decided);

        if !decided {
            return Ok(Vec::new());
        }

        let ready: Vec<_> = self
            .round(round + 1)
            .iter()
            .filter(|matchup| matchup.status == Status::Locked && matchup.is_full())
            .map(|matchup| matchup.id)
            .collect();

        for id in &ready {
            self.patch_matchup(*id, MatchupPatch::status(Status::Active))?;
        }

        if !ready.is_empty() {
            info!(
                "{} is open: {} matchups",
                round_name(round + 1).unwrap_or_default(),
                ready.len()
            );
        }

        Ok(ready)
    }
}
