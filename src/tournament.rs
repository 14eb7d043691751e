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

use std::{borrow::Cow, collections::BTreeMap, fmt, str::FromStr};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    FINAL_ROUND,
    character::{Character, CharacterField, CharacterId, ROSTER, Update},
    error::{BracketError, Entity},
    matchup::{BRACKET_SEEDS, Matchup, MatchupId, MatchupPatch, matchups_in_round},
    message::{COMMANDS, Message},
    participant::{PARTICIPANTS, Participant},
    status::Status,
    vote::{Choices, Ledger, Vote},
};

/// The whole state of one bracket: entrants, voters, matchups, and votes.
///
/// Every mutating method takes `&mut self`, so each call is one
/// uninterrupted read-modify-write. Wrap it in a
/// [`SharedTournament`](crate::shared::SharedTournament) to share it between
/// threads.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tournament {
    #[serde(default)]
    characters: BTreeMap<CharacterId, Character>,
    #[serde(default)]
    participants: BTreeMap<String, Participant>,
    #[serde(default)]
    matchups: BTreeMap<MatchupId, Matchup>,
    #[serde(default)]
    votes: Ledger,
    /// Ids are never reused, not even after a reset.
    #[serde(default)]
    next_id: u32,
}

/// What [`Tournament::create_tournament`] inserted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Seeded {
    pub characters: usize,
    pub participants: usize,
    pub matchups: usize,
}

impl fmt::Display for Seeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.characters, self.participants, self.matchups
        )
    }
}

impl Tournament {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        !self.characters.is_empty()
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts the 32 characters, the 6 participants, and all 31 matchups.
    /// Round one is paired from [`BRACKET_SEEDS`] and open for voting, every
    /// later round starts empty and locked.
    ///
    /// # Errors
    ///
    /// If any character already exists.
    pub fn create_tournament(&mut self) -> Result<Seeded, BracketError> {
        if self.is_seeded() {
            return Err(BracketError::AlreadySeeded);
        }

        let mut seeds = BTreeMap::new();
        for (seed, name, show) in ROSTER {
            let id = CharacterId(self.next_id());
            self.characters
                .insert(id, Character::new(id, seed, name, show));
            seeds.insert(seed, id);
        }

        for (name, slug) in PARTICIPANTS {
            self.participants
                .insert(slug.to_string(), Participant::new(name, slug));
        }

        for (position, (top, bottom)) in (0..).zip(BRACKET_SEEDS) {
            let top = *seeds.get(&top).ok_or(BracketError::NotFound(Entity::Seed(top)))?;
            let bottom = *seeds
                .get(&bottom)
                .ok_or(BracketError::NotFound(Entity::Seed(bottom)))?;

            let id = MatchupId(self.next_id());
            self.matchups
                .insert(id, Matchup::seeded(id, position, top, bottom));
        }

        for round in 2..=FINAL_ROUND {
            for position in 0..matchups_in_round(round) {
                let id = MatchupId(self.next_id());
                self.matchups
                    .insert(id, Matchup::locked(id, round, position));
            }
        }

        let seeded = Seeded {
            characters: self.characters.len(),
            participants: self.participants.len(),
            matchups: self.matchups.len(),
        };
        info!("seeded the bracket: {seeded}");

        Ok(seeded)
    }

    /// Deletes the votes, then the matchups, then the participants, then the
    /// characters.
    pub fn reset_tournament(&mut self) {
        let votes = self.votes.len();

        self.votes.clear();
        self.matchups.clear();
        self.participants.clear();
        self.characters.clear();

        info!("reset the bracket, dropped {votes} votes");
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    #[must_use]
    pub fn character_by_slug(&self, slug: &str) -> Option<&Character> {
        self.characters
            .values()
            .find(|character| character.slug == slug)
    }

    #[must_use]
    pub fn character_by_seed(&self, seed: u8) -> Option<&Character> {
        self.characters
            .values()
            .find(|character| character.seed == seed)
    }

    /// All characters, ordered by id.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    #[must_use]
    pub fn participant(&self, slug: &str) -> Option<&Participant> {
        self.participants.get(slug)
    }

    /// All participants, ordered by slug.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    #[must_use]
    pub fn matchup(&self, id: MatchupId) -> Option<&Matchup> {
        self.matchups.get(&id)
    }

    #[must_use]
    pub fn matchup_at(&self, round: u8, position: u8) -> Option<&Matchup> {
        self.matchups
            .values()
            .find(|matchup| matchup.round == round && matchup.position == position)
    }

    /// The matchups of `round`, ordered by position.
    #[must_use]
    pub fn round(&self, round: u8) -> Vec<&Matchup> {
        let mut matchups: Vec<_> = self
            .matchups
            .values()
            .filter(|matchup| matchup.round == round)
            .collect();

        matchups.sort_unstable_by_key(|matchup| matchup.position);
        matchups
    }

    /// All matchups, ordered by round then position.
    #[must_use]
    pub fn matchups(&self) -> Vec<&Matchup> {
        let mut matchups: Vec<_> = self.matchups.values().collect();
        matchups.sort_unstable_by_key(|matchup| (matchup.round, matchup.position));
        matchups
    }

    #[must_use]
    pub fn votes(&self) -> &Ledger {
        &self.votes
    }

    /// The highest round with a matchup open for voting.
    #[must_use]
    pub fn current_round(&self) -> Option<u8> {
        self.matchups
            .values()
            .filter(|matchup| matchup.status == Status::Active)
            .map(|matchup| matchup.round)
            .max()
    }

    /// The winner of the final, once it is decided.
    ///
    /// # Errors
    ///
    /// If the bracket is not seeded.
    pub fn champion(&self) -> Result<Option<&Character>, BracketError> {
        if !self.is_seeded() {
            return Err(BracketError::NotSeeded);
        }

        Ok(self
            .matchup_at(FINAL_ROUND, 0)
            .and_then(|matchup| matchup.winner)
            .and_then(|winner| self.character(winner)))
    }

    /// # Errors
    ///
    /// If the matchup does not exist or the patch breaks one of its
    /// invariants.
    pub fn patch_matchup(
        &mut self,
        id: MatchupId,
        patch: MatchupPatch,
    ) -> Result<&Matchup, BracketError> {
        let matchup = self
            .matchups
            .get_mut(&id)
            .ok_or(BracketError::NotFound(Entity::Matchup(id)))?;

        matchup.apply(patch)?;
        Ok(&*matchup)
    }

    /// # Errors
    ///
    /// If no character has the slug.
    pub fn patch_character(
        &mut self,
        slug: &str,
        field: CharacterField,
        value: String,
    ) -> Result<&Character, BracketError> {
        let character = self
            .characters
            .values_mut()
            .find(|character| character.slug == slug)
            .ok_or_else(|| BracketError::NotFound(Entity::CharacterSlug(slug.to_string())))?;

        character.set(field, value);
        Ok(&*character)
    }

    /// Sets `field` on every character named by an update's slug. Unknown
    /// slugs are skipped. Returns how many characters were updated.
    pub fn batch_update(&mut self, field: CharacterField, updates: &[Update]) -> usize {
        let mut updated = 0;

        for update in updates {
            if self
                .patch_character(&update.slug, field, update.value.clone())
                .is_ok()
            {
                updated += 1;
            } else {
                debug!("batch_update {field}: skipping unknown slug {}", update.slug);
            }
        }

        info!("batch_update {field}: updated {updated} of {}", updates.len());
        updated
    }

    /// Records a participant's choice in an active matchup, replacing any
    /// earlier choice of theirs. Returns every participant's current choice
    /// in that matchup.
    ///
    /// # Errors
    ///
    /// If the matchup does not exist or is not active, the character is not
    /// one of its two slots, or the participant is unknown.
    pub fn record_vote(
        &mut self,
        matchup_id: MatchupId,
        participant: &str,
        character: CharacterId,
    ) -> Result<Choices, BracketError> {
        let matchup = self
            .matchup(matchup_id)
            .ok_or(BracketError::NotFound(Entity::Matchup(matchup_id)))?;

        if matchup.status != Status::Active {
            return Err(BracketError::InvalidState {
                matchup: matchup_id,
                status: matchup.status,
            });
        }
        if !matchup.contains(character) {
            if self.character(character).is_none() {
                return Err(BracketError::NotFound(Entity::Character(character)));
            }
            return Err(BracketError::InvalidChoice {
                matchup: matchup_id,
                character,
            });
        }
        if self.participant(participant).is_none() {
            return Err(BracketError::NotFound(Entity::Participant(
                participant.to_string(),
            )));
        }

        let replaced = self.votes.upsert(Vote {
            matchup: matchup_id,
            participant: participant.to_string(),
            character,
            created_at: Utc::now().timestamp_millis(),
        });

        if replaced {
            debug!("matchup {matchup_id}: {participant} changed their vote to {character}");
        } else {
            debug!("matchup {matchup_id}: {participant} voted for {character}");
        }

        Ok(self.votes.choices(matchup_id))
    }

    /// Parses and runs one line of the text protocol. `#` starts a comment.
    ///
    /// # Errors
    ///
    /// If the command is invalid or fails.
    pub fn read_line(&mut self, buffer: &str) -> anyhow::Result<Option<String>> {
        let mut buffer = Cow::from(buffer);
        if let Some(comment_offset) = buffer.find('#') {
            buffer.to_mut().replace_range(comment_offset.., "");
        }

        self.update(Message::from_str(buffer.as_ref())?)
    }

    /// # Errors
    ///
    /// If the command fails.
    pub fn update(&mut self, message: Message) -> anyhow::Result<Option<String>> {
        match message {
            Message::Bracket => {
                let lines: Vec<_> = self
                    .bracket()
                    .iter()
                    .map(ToString::to_string)
                    .collect();

                Ok(Some(format!("bracket\n{}", lines.join("\n"))))
            }
            Message::CastVote {
                matchup,
                participant,
                character,
            } => {
                let outcome = self.cast_vote(matchup, &participant, character)?;
                Ok(Some(format!("cast_vote {outcome}")))
            }
            Message::Champion => match self.champion()? {
                Some(champion) => Ok(Some(format!("champion {}", champion.name))),
                None => Ok(Some("champion none".to_string())),
            },
            Message::CurrentRound => match self.current_round() {
                Some(round) => Ok(Some(format!("current_round {round}"))),
                None => Ok(Some("current_round none".to_string())),
            },
            Message::Empty => Ok(None),
            Message::InitBracket => {
                let seeded = self.create_tournament()?;
                Ok(Some(format!("init_bracket {seeded}")))
            }
            Message::KnownCommand(command) => {
                if COMMANDS.contains(&command.as_str()) {
                    Ok(Some("true".to_string()))
                } else {
                    Ok(Some("false".to_string()))
                }
            }
            Message::ListCommands => {
                let mut commands = "\n".to_string();
                commands.push_str(&COMMANDS.join("\n"));
                Ok(Some(commands))
            }
            Message::Matchup(id) => match self.matchup_view(id) {
                Some(view) => Ok(Some(format!("matchup {view}"))),
                None => Err(BracketError::NotFound(Entity::Matchup(id)).into()),
            },
            Message::Participants => {
                let participants: Vec<_> = self
                    .participants()
                    .map(|participant| participant.slug.as_str())
                    .collect();

                Ok(Some(format!("participants {}", participants.join(" "))))
            }
            Message::Quit => Ok(Some("quit".to_string())),
            Message::ResetBracket => {
                self.reset_tournament();
                Ok(Some("reset_bracket".to_string()))
            }
            Message::Update { field, update } => {
                let updated = self.batch_update(field, &[update]);
                Ok(Some(format!("update_{field} {updated}")))
            }
        }
    }
}
