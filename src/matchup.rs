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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{FINAL_ROUND, character::CharacterId, error::BracketError, status::Status};

/// Round one pairings as `(top seed, bottom seed)`, indexed by position.
/// Each pair sums to 33.
pub const BRACKET_SEEDS: [(u8, u8); 16] = [
    (1, 32),
    (16, 17),
    (8, 25),
    (9, 24),
    (4, 29),
    (13, 20),
    (5, 28),
    (12, 21),
    (2, 31),
    (15, 18),
    (7, 26),
    (10, 23),
    (3, 30),
    (14, 19),
    (6, 27),
    (11, 22),
];

/// The number of matchups in `round`: 16, 8, 4, 2, then 1.
#[must_use]
pub fn matchups_in_round(round: u8) -> u8 {
    if (1..=FINAL_ROUND).contains(&round) {
        1 << (FINAL_ROUND - round)
    } else {
        0
    }
}

#[must_use]
pub fn round_name(round: u8) -> Option<&'static str> {
    match round {
        1 => Some("Round of 32"),
        2 => Some("Sweet 16"),
        3 => Some("Elite 8"),
        4 => Some("Final Four"),
        5 => Some("Championship"),
        _ => None,
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct MatchupId(pub u32);

impl fmt::Display for MatchupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchupId {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.parse() {
            Ok(id) => Ok(Self(id)),
            Err(error) => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a MatchupId: {error}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Slot {
    Top,
    Bottom,
}

impl Slot {
    /// Even positions feed the top slot of the next round, odd ones the bottom.
    #[must_use]
    pub fn for_position(position: u8) -> Self {
        if position % 2 == 0 {
            Self::Top
        } else {
            Self::Bottom
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// One cell of the bracket.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Matchup {
    pub id: MatchupId,
    pub round: u8,
    pub position: u8,
    pub top: Option<CharacterId>,
    pub bottom: Option<CharacterId>,
    pub winner: Option<CharacterId>,
    pub status: Status,
}

impl Matchup {
    /// An empty matchup in a later round, waiting for winners.
    #[must_use]
    pub fn locked(id: MatchupId, round: u8, position: u8) -> Self {
        Self {
            id,
            round,
            position,
            top: None,
            bottom: None,
            winner: None,
            status: Status::Locked,
        }
    }

    /// A round one matchup, open for voting from the start.
    #[must_use]
    pub fn seeded(id: MatchupId, position: u8, top: CharacterId, bottom: CharacterId) -> Self {
        Self {
            id,
            round: 1,
            position,
            top: Some(top),
            bottom: Some(bottom),
            winner: None,
            status: Status::Active,
        }
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> Option<CharacterId> {
        match slot {
            Slot::Top => self.top,
            Slot::Bottom => self.bottom,
        }
    }

    #[must_use]
    pub fn contains(&self, character: CharacterId) -> bool {
        self.top == Some(character) || self.bottom == Some(character)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }

    /// Where the winner goes: `(round, position, slot)`, or `None` for the
    /// final.
    #[must_use]
    pub fn next(&self) -> Option<(u8, u8, Slot)> {
        if self.round >= FINAL_ROUND {
            None
        } else {
            Some((
                self.round + 1,
                self.position / 2,
                Slot::for_position(self.position),
            ))
        }
    }

    /// Applies every field of `patch` or none of them.
    ///
    /// # Errors
    ///
    /// If the patch would break an invariant: a slot is only filled while
    /// locked and never overwritten, the winner is one of the slots and is
    /// set once, and status only moves forward.
    pub fn apply(&mut self, patch: MatchupPatch) -> Result<(), BracketError> {
        let mut next = self.clone();

        if let Some(top) = patch.top {
            next.fill(Slot::Top, top)?;
        }
        if let Some(bottom) = patch.bottom {
            next.fill(Slot::Bottom, bottom)?;
        }
        if let Some(winner) = patch.winner {
            next.set_winner(winner)?;
        }
        if let Some(status) = patch.status {
            next.set_status(status)?;
        }

        *self = next;
        Ok(())
    }

    fn invalid_state(&self) -> BracketError {
        BracketError::InvalidState {
            matchup: self.id,
            status: self.status,
        }
    }

    fn fill(&mut self, slot: Slot, character: CharacterId) -> Result<(), BracketError> {
        if self.status != Status::Locked {
            return Err(self.invalid_state());
        }

        let error = self.invalid_state();
        let entry = match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
        };

        if entry.is_some_and(|existing| existing != character) {
            return Err(error);
        }

        *entry = Some(character);
        Ok(())
    }

    fn set_winner(&mut self, winner: CharacterId) -> Result<(), BracketError> {
        if self.status != Status::Active || self.winner.is_some() {
            return Err(self.invalid_state());
        }
        if !self.contains(winner) {
            return Err(BracketError::InvalidChoice {
                matchup: self.id,
                character: winner,
            });
        }

        self.winner = Some(winner);
        Ok(())
    }

    fn set_status(&mut self, status: Status) -> Result<(), BracketError> {
        let ready = match status {
            Status::Locked => false,
            Status::Active => self.is_full(),
            Status::Decided => self.winner.is_some(),
        };

        if !ready || !self.status.can_become(status) {
            return Err(self.invalid_state());
        }

        self.status = status;
        Ok(())
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |id: Option<CharacterId>| id.map_or_else(|| "_".to_string(), |id| id.to_string());

        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.id,
            self.round,
            self.position,
            self.status,
            slot(self.top),
            slot(self.bottom),
            slot(self.winner),
        )
    }
}

/// A change to some fields of a matchup, applied with [`Matchup::apply`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchupPatch {
    pub top: Option<CharacterId>,
    pub bottom: Option<CharacterId>,
    pub winner: Option<CharacterId>,
    pub status: Option<Status>,
}

impl MatchupPatch {
    #[must_use]
    pub fn fill(slot: Slot, character: CharacterId) -> Self {
        match slot {
            Slot::Top => Self {
                top: Some(character),
                ..Self::default()
            },
            Slot::Bottom => Self {
                bottom: Some(character),
                ..Self::default()
            },
        }
    }

    #[must_use]
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn decide(winner: CharacterId) -> Self {
        Self {
            winner: Some(winner),
            status: Some(Status::Decided),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error_str<T>(result: Result<T, BracketError>, string: &str) {
        let error = result.err().map(|error| error.to_string());
        assert_eq!(error.as_deref(), Some(string));
    }

    #[test]
    fn round_sizes() {
        let sizes: Vec<_> = (1..=FINAL_ROUND).map(matchups_in_round).collect();

        assert_eq!(sizes, [16, 8, 4, 2, 1]);
        assert_eq!(matchups_in_round(0), 0);
        assert_eq!(matchups_in_round(6), 0);
        assert_eq!(
            sizes.iter().map(|size| usize::from(*size)).sum::<usize>(),
            crate::MATCHUPS
        );
    }

    #[test]
    fn seeds_pair_to_33() {
        for (top, bottom) in BRACKET_SEEDS {
            assert_eq!(top + bottom, 33);
            assert!(top < bottom);
        }
    }

    #[test]
    fn next_matchup() {
        let even = Matchup::locked(MatchupId(0), 2, 6);
        let odd = Matchup::locked(MatchupId(1), 1, 13);
        let last = Matchup::locked(MatchupId(2), FINAL_ROUND, 0);

        assert_eq!(even.next(), Some((3, 3, Slot::Top)));
        assert_eq!(odd.next(), Some((2, 6, Slot::Bottom)));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn fill_then_activate() -> anyhow::Result<()> {
        let mut matchup = Matchup::locked(MatchupId(20), 2, 0);

        assert_error_str(
            matchup.apply(MatchupPatch::status(Status::Active)),
            "bracket: matchup 20 is locked",
        );

        matchup.apply(MatchupPatch::fill(Slot::Top, CharacterId(1)))?;
        matchup.apply(MatchupPatch::fill(Slot::Bottom, CharacterId(16)))?;
        matchup.apply(MatchupPatch::status(Status::Active))?;

        assert_eq!(matchup.status, Status::Active);
        assert_eq!(matchup.to_string(), "20 2 0 active 1 16 _");

        Ok(())
    }

    #[test]
    fn slots_are_not_overwritten() -> anyhow::Result<()> {
        let mut matchup = Matchup::locked(MatchupId(20), 2, 0);
        matchup.apply(MatchupPatch::fill(Slot::Top, CharacterId(1)))?;

        // The same winner again is harmless.
        matchup.apply(MatchupPatch::fill(Slot::Top, CharacterId(1)))?;
        assert!(
            matchup
                .apply(MatchupPatch::fill(Slot::Top, CharacterId(32)))
                .is_err()
        );
        assert_eq!(matchup.top, Some(CharacterId(1)));

        Ok(())
    }

    #[test]
    fn decide_is_final() -> anyhow::Result<()> {
        let mut matchup = Matchup::seeded(MatchupId(0), 0, CharacterId(1), CharacterId(32));

        assert_error_str(
            matchup.apply(MatchupPatch::decide(CharacterId(2))),
            "bracket: character 2 is not in matchup 0",
        );
        assert_eq!(matchup.winner, None);

        matchup.apply(MatchupPatch::decide(CharacterId(32)))?;
        assert_eq!(matchup.winner, Some(CharacterId(32)));
        assert_eq!(matchup.status, Status::Decided);

        assert_error_str(
            matchup.apply(MatchupPatch::decide(CharacterId(1))),
            "bracket: matchup 0 is decided",
        );
        assert!(
            matchup
                .apply(MatchupPatch::status(Status::Active))
                .is_err()
        );
        assert_eq!(matchup.winner, Some(CharacterId(32)));

        Ok(())
    }

    #[test]
    fn failed_patch_changes_nothing() {
        let mut matchup = Matchup::locked(MatchupId(25), 3, 1);
        let before = matchup.clone();

        let patch = MatchupPatch {
            top: Some(CharacterId(4)),
            status: Some(Status::Active),
            ..MatchupPatch::default()
        };

        assert!(matchup.apply(patch).is_err());
        assert_eq!(matchup, before);
    }
}
