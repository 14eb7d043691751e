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

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{character::CharacterId, matchup::MatchupId};

/// A participant's current choice in one matchup.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Vote {
    pub matchup: MatchupId,
    pub participant: String,
    pub character: CharacterId,
    /// Milliseconds since the Unix epoch of the latest write.
    pub created_at: i64,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.participant, self.character)
    }
}

/// Each participant's choice, keyed by participant slug.
pub type Choices = BTreeMap<String, CharacterId>;

/// Holds at most one vote per (matchup, participant).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ledger(pub BTreeMap<MatchupId, BTreeMap<String, Vote>>);

impl Ledger {
    /// Inserts `vote`, or overwrites the choice and timestamp of the vote the
    /// same participant already has in that matchup. Returns `true` if a
    /// vote was replaced.
    pub fn upsert(&mut self, vote: Vote) -> bool {
        self.0
            .entry(vote.matchup)
            .or_default()
            .insert(vote.participant.clone(), vote)
            .is_some()
    }

    #[must_use]
    pub fn choices(&self, matchup: MatchupId) -> Choices {
        self.votes(matchup)
            .map(|vote| (vote.participant.clone(), vote.character))
            .collect()
    }

    /// The votes in `matchup`, ordered by participant slug.
    pub fn votes(&self, matchup: MatchupId) -> impl Iterator<Item = &Vote> {
        self.0
            .get(&matchup)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    #[must_use]
    pub fn vote(&self, matchup: MatchupId, participant: &str) -> Option<&Vote> {
        self.0.get(&matchup)?.get(participant)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
