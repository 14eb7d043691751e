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

use std::str::FromStr;

use crate::{
    character::{CharacterField, CharacterId, Update},
    matchup::MatchupId,
};

pub const COMMANDS: [&str; 13] = [
    "bracket",
    "cast_vote",
    "champion",
    "current_round",
    "init_bracket",
    "known_command",
    "list_commands",
    "matchup",
    "participants",
    "quit",
    "reset_bracket",
    "update_tagline",
    "update_youtube_url",
];

/// One line of the bracket text protocol.
///
/// Replies start with `=` on success and `?` on failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    /// `bracket`
    ///
    /// Every matchup, one per line, ordered by round then position.
    Bracket,

    /// `cast_vote 0 josh 5`
    ///
    /// Record participant `josh` choosing character `5` in matchup `0`.
    CastVote {
        matchup: MatchupId,
        participant: String,
        character: CharacterId,
    },

    /// `champion`
    Champion,

    /// `current_round`
    ///
    /// The highest round with a matchup open for voting.
    CurrentRound,

    /// An empty line or a comment.
    Empty,

    /// `init_bracket`
    InitBracket,

    /// `known_command cast_vote`
    KnownCommand(String),

    /// `list_commands`
    ListCommands,

    /// `matchup 0`
    Matchup(MatchupId),

    /// `participants`
    Participants,

    /// `quit`
    Quit,

    /// `reset_bracket`
    ResetBracket,

    /// `update_tagline bugs-bunny What's up, doc?`
    /// `update_youtube_url bugs-bunny https://...`
    Update {
        field: CharacterField,
        update: Update,
    },
}

impl Message {
    /// Whether running the message can change the tournament.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::CastVote { .. } | Self::InitBracket | Self::ResetBracket | Self::Update { .. }
        )
    }
}

impl FromStr for Message {
    type Err = anyhow::Error;

    fn from_str(message: &str) -> anyhow::Result<Self> {
        let args: Vec<&str> = message.split_ascii_whitespace().collect();

        let Some(command) = args.first() else {
            return Ok(Self::Empty);
        };

        match *command {
            "bracket" => Ok(Self::Bracket),
            "cast_vote" => {
                let (Some(matchup), Some(participant), Some(character)) =
                    (args.get(1), args.get(2), args.get(3))
                else {
                    return Err(anyhow::Error::msg(
                        "cast_vote: expected a matchup, a participant, and a character",
                    ));
                };

                Ok(Self::CastVote {
                    matchup: matchup.parse()?,
                    participant: (*participant).to_string(),
                    character: character.parse()?,
                })
            }
            "champion" => Ok(Self::Champion),
            "current_round" => Ok(Self::CurrentRound),
            "init_bracket" => Ok(Self::InitBracket),
            "known_command" => match args.get(1) {
                Some(command) => Ok(Self::KnownCommand((*command).to_string())),
                None => Err(anyhow::Error::msg("known_command: expected a command")),
            },
            "list_commands" => Ok(Self::ListCommands),
            "matchup" => match args.get(1) {
                Some(id) => Ok(Self::Matchup(id.parse()?)),
                None => Err(anyhow::Error::msg("matchup: expected a matchup")),
            },
            "participants" => Ok(Self::Participants),
            "quit" => Ok(Self::Quit),
            "reset_bracket" => Ok(Self::ResetBracket),
            "update_tagline" | "update_youtube_url" => {
                let field = command.trim_start_matches("update_").parse()?;

                let Some(slug) = args.get(1) else {
                    return Err(anyhow::Error::msg(format!("{command}: expected a slug")));
                };
                let value = args.get(2..).unwrap_or_default().join(" ");
                if value.is_empty() {
                    return Err(anyhow::Error::msg(format!("{command}: expected a value")));
                }

                Ok(Self::Update {
                    field,
                    update: Update {
                        slug: (*slug).to_string(),
                        value,
                    },
                })
            }
            _ => Err(anyhow::Error::msg(format!(
                "unrecognized command: {command}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_vote() -> anyhow::Result<()> {
        assert_eq!(
            Message::from_str("cast_vote 3 josh 17")?,
            Message::CastVote {
                matchup: MatchupId(3),
                participant: "josh".to_string(),
                character: CharacterId(17),
            }
        );
        assert!(Message::from_str("cast_vote 3 josh").is_err());
        assert!(Message::from_str("cast_vote x josh 17").is_err());

        Ok(())
    }

    #[test]
    fn update_keeps_spaces() -> anyhow::Result<()> {
        assert_eq!(
            Message::from_str("update_tagline bugs-bunny What's  up, doc?")?,
            Message::Update {
                field: CharacterField::Tagline,
                update: Update {
                    slug: "bugs-bunny".to_string(),
                    value: "What's up, doc?".to_string(),
                },
            }
        );
        assert!(Message::from_str("update_youtube_url bugs-bunny").is_err());

        Ok(())
    }

    #[test]
    fn every_command_parses_or_asks_for_arguments() {
        for command in COMMANDS {
            if let Err(error) = Message::from_str(command) {
                assert!(
                    error.to_string().starts_with(command),
                    "{command}: {error}"
                );
            }
        }
        assert!(Message::from_str("vote").is_err());
        assert_eq!(Message::from_str("   ").ok(), Some(Message::Empty));
    }

    #[test]
    fn mutating() -> anyhow::Result<()> {
        assert!(Message::from_str("init_bracket")?.is_mutating());
        assert!(Message::from_str("cast_vote 0 josh 0")?.is_mutating());
        assert!(!Message::from_str("bracket")?.is_mutating());
        assert!(!Message::from_str("quit")?.is_mutating());

        Ok(())
    }
}
