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

/// The 32 entrants as `(seed, name, show)`.
pub const ROSTER: [(u8, &str, &str); 32] = [
    (1, "Bugs Bunny", "Looney Tunes"),
    (2, "Batman", "Batman: TAS"),
    (3, "Spider-Man", "Spider-Man: TAS"),
    (4, "Goku", "Dragon Ball Z"),
    (5, "Wolverine", "X-Men: TAS"),
    (6, "SpongeBob", "SpongeBob SquarePants"),
    (7, "Bart Simpson", "The Simpsons"),
    (8, "Optimus Prime", "Transformers"),
    (9, "Michelangelo", "TMNT"),
    (10, "He-Man", "Masters of the Universe"),
    (11, "Scooby-Doo", "Scooby-Doo"),
    (12, "Darkwing Duck", "Darkwing Duck"),
    (13, "Dexter", "Dexter's Laboratory"),
    (14, "Lion-O", "Thundercats"),
    (15, "Goliath", "Gargoyles"),
    (16, "Cartman", "South Park"),
    (17, "Daffy Duck", "Looney Tunes"),
    (18, "Tom", "Tom & Jerry"),
    (19, "Courage", "Courage the Cowardly Dog"),
    (20, "Donatello", "TMNT"),
    (21, "Yakko", "Animaniacs"),
    (22, "Brain", "Pinky and the Brain"),
    (23, "Danny Phantom", "Danny Phantom"),
    (24, "Hey Arnold", "Hey Arnold!"),
    (25, "Blossom", "Powerpuff Girls"),
    (26, "Johnny Bravo", "Johnny Bravo"),
    (27, "Doug Funnie", "Doug"),
    (28, "Ed", "Ed, Edd n Eddy"),
    (29, "Rocko", "Rocko's Modern Life"),
    (30, "Skeletor", "Masters of the Universe"),
    (31, "The Tick", "The Tick"),
    (32, "Dagget", "Angry Beavers"),
];

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CharacterId {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.parse() {
            Ok(id) => Ok(Self(id)),
            Err(error) => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a CharacterId: {error}"
            ))),
        }
    }
}

/// An entrant in the bracket.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub slug: String,
    pub show: String,
    /// Lower is stronger. Unique per tournament, so it breaks every tie.
    pub seed: u8,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl Character {
    #[must_use]
    pub fn new(id: CharacterId, seed: u8, name: &str, show: &str) -> Self {
        let slug = slugify(name);

        Self {
            id,
            name: name.to_string(),
            avatar_url: Some(format!("/characters/{slug}.png")),
            slug,
            show: show.to_string(),
            seed,
            youtube_url: None,
            tagline: None,
        }
    }

    pub fn set(&mut self, field: CharacterField, value: String) {
        match field {
            CharacterField::YoutubeUrl => self.youtube_url = Some(value),
            CharacterField::Tagline => self.tagline = Some(value),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) #{}", self.name, self.show, self.seed)
    }
}

/// The fields an administrator may change after the bracket is seeded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CharacterField {
    YoutubeUrl,
    Tagline,
}

impl fmt::Display for CharacterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YoutubeUrl => write!(f, "youtube_url"),
            Self::Tagline => write!(f, "tagline"),
        }
    }
}

impl FromStr for CharacterField {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "youtube_url" => Ok(Self::YoutubeUrl),
            "tagline" => Ok(Self::Tagline),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a CharacterField!"
            ))),
        }
    }
}

/// One row of a batch update: the character's slug and the new value.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Update {
    pub slug: String,
    pub value: String,
}

/// Lowercases `name` and joins its ASCII alphanumeric runs with `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut separator = false;

    for character in name.chars() {
        let character = character.to_ascii_lowercase();

        if character.is_ascii_lowercase() || character.is_ascii_digit() {
            if separator && !slug.is_empty() {
                slug.push('-');
            }
            separator = false;
            slug.push(character);
        } else {
            separator = true;
        }
    }

    slug
}
