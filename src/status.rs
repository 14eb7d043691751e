// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Status {
    #[default]
    Locked,
    Active,
    Decided,
}

impl Status {
    /// Status only moves forward: locked, then active, then decided.
    #[must_use]
    pub fn can_become(self, next: Status) -> bool {
        matches!(
            (self, next),
            (Self::Locked, Self::Active) | (Self::Active, Self::Decided)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Active => write!(f, "active"),
            Self::Decided => write!(f, "decided"),
        }
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "locked" => Ok(Self::Locked),
            "active" => Ok(Self::Active),
            "decided" => Ok(Self::Decided),
            _ => Err(anyhow::Error::msg(format!("invalid status: {value}"))),
        }
    }
}
