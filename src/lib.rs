//! A March Madness style voting bracket.
//!
//! 32 characters play a single elimination bracket over five rounds. Six
//! participants vote on every matchup. Once all six have voted, the character
//! with the most votes advances, ties going to the lower seed. A round opens
//! only after every matchup of the round before it is decided.
//!
//! The [`Tournament`](tournament::Tournament) holds the state and
//! [`Tournament::cast_vote`](tournament::Tournament::cast_vote) drives it.
//! [`SharedTournament`](shared::SharedTournament) shares one between threads.
//!
//! ## Feature Flags
//!
//! * bench - enable the criterion benchmark
//!
//! ## Message Protocol
//!
//! The `madness-bracket` binary speaks a line based [message protocol].
//!
//! [message protocol]: message::Message

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

#![deny(clippy::panic)]

pub mod character;
pub mod engine;
pub mod error;
pub mod matchup;
pub mod message;
pub mod participant;
pub mod shared;
pub mod status;
pub mod tournament;
pub mod utils;
pub mod view;
pub mod vote;

/// Every matchup waits for this many votes.
pub const VOTERS: usize = 6;
pub const FINAL_ROUND: u8 = 5;
pub const ENTRANTS: usize = 32;
pub const MATCHUPS: usize = ENTRANTS - 1;

pub const HOME: &str = "madness-bracket";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the madness-bracket project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the madness-bracket project
Licensed under the AGPLv3"
);
