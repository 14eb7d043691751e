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

use std::fmt;

use thiserror::Error;

use crate::{character::CharacterId, matchup::MatchupId, status::Status};

/// Every error is terminal for the request that caused it. None of them are
/// worth retrying.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BracketError {
    #[error("bracket: {0} not found")]
    NotFound(Entity),
    #[error("bracket: matchup {matchup} is {status}")]
    InvalidState { matchup: MatchupId, status: Status },
    #[error("bracket: character {character} is not in matchup {matchup}")]
    InvalidChoice {
        matchup: MatchupId,
        character: CharacterId,
    },
    #[error("bracket: already seeded, reset it first")]
    AlreadySeeded,
    #[error("bracket: not seeded, initialize it first")]
    NotSeeded,
    #[error("bracket: the tournament lock is poisoned")]
    Poisoned,
}

/// What a [`BracketError::NotFound`] was looking for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entity {
    Character(CharacterId),
    CharacterSlug(String),
    Matchup(MatchupId),
    Participant(String),
    Position { round: u8, position: u8 },
    Seed(u8),
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(id) => write!(f, "character {id}"),
            Self::CharacterSlug(slug) => write!(f, "character '{slug}'"),
            Self::Matchup(id) => write!(f, "matchup {id}"),
            Self::Participant(slug) => write!(f, "participant '{slug}'"),
            Self::Position { round, position } => {
                write!(f, "matchup at round {round} position {position}")
            }
            Self::Seed(seed) => write!(f, "seed {seed}"),
        }
    }
}
