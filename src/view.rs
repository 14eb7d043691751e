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

use serde::{Deserialize, Serialize};

use crate::{
    character::{Character, CharacterId},
    error::{BracketError, Entity},
    matchup::{Matchup, MatchupId},
    tournament::Tournament,
};

/// A matchup with its characters and votes filled in, for display.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchupView {
    pub matchup: Matchup,
    pub top: Option<Character>,
    pub bottom: Option<Character>,
    pub winner: Option<Character>,
    pub votes: Vec<VoteView>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VoteView {
    pub participant: String,
    pub character: CharacterId,
}

impl MatchupView {
    /// The participant's current choice.
    #[must_use]
    pub fn vote_of(&self, participant: &str) -> Option<CharacterId> {
        self.votes
            .iter()
            .find(|vote| vote.participant == participant)
            .map(|vote| vote.character)
    }

    /// The participants who chose `character`.
    #[must_use]
    pub fn voters_for(&self, character: CharacterId) -> Vec<&str> {
        self.votes
            .iter()
            .filter(|vote| vote.character == character)
            .map(|vote| vote.participant.as_str())
            .collect()
    }
}

impl fmt::Display for MatchupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = |character: &Option<Character>| {
            character
                .as_ref()
                .map_or("_", |character| character.slug.as_str())
                .to_string()
        };
        let votes: Vec<_> = self
            .votes
            .iter()
            .map(|vote| format!("{}:{}", vote.participant, vote.character))
            .collect();

        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.matchup.id,
            self.matchup.round,
            self.matchup.position,
            self.matchup.status,
            slug(&self.top),
            slug(&self.bottom),
            slug(&self.winner),
            if votes.is_empty() {
                "_".to_string()
            } else {
                votes.join(",")
            },
        )
    }
}

impl Tournament {
    fn view(&self, matchup: &Matchup) -> MatchupView {
        let character = |id: Option<CharacterId>| id.and_then(|id| self.character(id)).cloned();

        MatchupView {
            matchup: matchup.clone(),
            top: character(matchup.top),
            bottom: character(matchup.bottom),
            winner: character(matchup.winner),
            votes: self
                .votes()
                .votes(matchup.id)
                .map(|vote| VoteView {
                    participant: vote.participant.clone(),
                    character: vote.character,
                })
                .collect(),
        }
    }

    /// Every matchup, ordered by round then position.
    #[must_use]
    pub fn bracket(&self) -> Vec<MatchupView> {
        self.matchups()
            .into_iter()
            .map(|matchup| self.view(matchup))
            .collect()
    }

    #[must_use]
    pub fn matchup_view(&self, id: MatchupId) -> Option<MatchupView> {
        self.matchup(id).map(|matchup| self.view(matchup))
    }

    /// The participants who have not voted in the matchup yet.
    ///
    /// # Errors
    ///
    /// If the matchup does not exist.
    pub fn pending_voters(&self, id: MatchupId) -> Result<Vec<&str>, BracketError> {
        if self.matchup(id).is_none() {
            return Err(BracketError::NotFound(Entity::Matchup(id)));
        }

        Ok(self
            .participants()
            .filter(|participant| self.votes().vote(id, &participant.slug).is_none())
            .map(|participant| participant.slug.as_str())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::status::Status;

    #[test]
    fn empty_bracket() {
        assert!(Tournament::new().bracket().is_empty());
    }

    #[test]
    fn bracket_is_sorted() -> anyhow::Result<()> {
        let mut tournament = Tournament::new();
        tournament.create_tournament()?;

        let bracket = tournament.bracket();
        assert_eq!(bracket.len(), crate::MATCHUPS);

        let order: Vec<_> = bracket
            .iter()
            .map(|view| (view.matchup.round, view.matchup.position))
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);

        let first = bracket.first().map(ToString::to_string);
        assert_eq!(
            first.as_deref(),
            Some("32 1 0 active bugs-bunny dagget _ _")
        );

        let last = bracket.last();
        assert_eq!(last.map(|view| view.matchup.status), Some(Status::Locked));
        assert_eq!(last.and_then(|view| view.top.as_ref()), None);

        Ok(())
    }

    #[test]
    fn votes_are_listed() -> anyhow::Result<()> {
        let mut tournament = Tournament::new();
        tournament.create_tournament()?;

        let Some((id, Some(top), Some(bottom))) = tournament
            .matchup_at(1, 0)
            .map(|matchup| (matchup.id, matchup.top, matchup.bottom))
        else {
            return Err(anyhow::Error::msg("round one is not full"));
        };

        tournament.cast_vote(id, "josh", top)?;
        tournament.cast_vote(id, "joey", bottom)?;
        tournament.cast_vote(id, "morgan", top)?;

        let view = tournament
            .matchup_view(id)
            .ok_or_else(|| anyhow::Error::msg("no view"))?;

        assert_eq!(view.vote_of("joey"), Some(bottom));
        assert_eq!(view.vote_of("david"), None);
        assert_eq!(view.voters_for(top), ["josh", "morgan"]);
        assert_eq!(
            view.to_string(),
            format!("{id} 1 0 active bugs-bunny dagget _ joey:{bottom},josh:{top},morgan:{top}")
        );
        assert_eq!(
            tournament.pending_voters(id)?,
            ["david", "jarad", "jarsh"]
        );
        assert!(tournament.pending_voters(MatchupId(9_999)).is_err());

        Ok(())
    }
}
