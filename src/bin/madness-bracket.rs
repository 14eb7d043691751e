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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

use std::{
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::{CommandFactory, Parser};
use log::{debug, error, info};
use madness_bracket::{
    COPYRIGHT, LONG_VERSION,
    message::Message,
    tournament::Tournament,
    utils::{self, create_data_folder, data_file},
};

const DATA_FILE: &str = "tournament.ron";

/// March Madness Voting Bracket
///
/// Reads bracket commands from stdin, one per line, and answers each with a
/// line starting with `=` on success or `?` on failure. Enter `list_commands`
/// for a list of commands.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "March Madness Voting Bracket")]
struct Args {
    /// Where to load and save the tournament
    #[arg(long, value_name = "path")]
    data_file: Option<PathBuf>,

    /// Whether to keep the tournament in memory only
    #[arg(long)]
    skip_the_data_file: bool,

    /// Whether to log on the debug level
    #[arg(long)]
    debug: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    systemd: bool,

    /// Build the manpage
    #[arg(long)]
    man: bool,
}

impl Args {
    fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("madness-bracket").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-03-01");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        fs::write("madness-bracket.1", buffer)?;
        Ok(())
    }

    fn path(&self) -> anyhow::Result<Option<PathBuf>> {
        if self.skip_the_data_file {
            return Ok(None);
        }

        if let Some(path) = &self.data_file {
            Ok(Some(path.clone()))
        } else {
            create_data_folder()?;
            Ok(Some(data_file(DATA_FILE)))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger("madness_bracket", args.debug, args.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    let path = args.path()?;
    let mut tournament = match &path {
        Some(path) => load(path)?,
        None => Tournament::default(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }

        let line = buffer.split('#').next().unwrap_or_default();
        let message = match Message::from_str(line) {
            Ok(Message::Quit) => {
                writeln!(stdout, "= quit")?;
                break;
            }
            Ok(message) => message,
            Err(error) => {
                writeln!(stdout, "? {error}")?;
                continue;
            }
        };

        debug!("{message:?}");
        let mutating = message.is_mutating();

        match tournament.update(message) {
            Ok(Some(reply)) => {
                writeln!(stdout, "= {reply}")?;

                if mutating && let Some(path) = &path {
                    save(&tournament, path);
                }
            }
            Ok(None) => {}
            Err(error) => writeln!(stdout, "? {error}")?,
        }

        stdout.flush()?;
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Tournament> {
    match fs::read_to_string(path) {
        Ok(string) => match ron::from_str(string.as_str()) {
            Ok(tournament) => {
                info!("loaded {}", path.display());
                Ok(tournament)
            }
            Err(err) => Err(anyhow::Error::msg(format!(
                "RON: {}: {err}",
                path.display(),
            ))),
        },
        Err(err) => match err.kind() {
            ErrorKind::NotFound => {
                info!("{} not found, starting empty", path.display());
                Ok(Tournament::default())
            }
            _ => Err(anyhow::Error::msg(err.to_string())),
        },
    }
}

fn save(tournament: &Tournament, path: &Path) {
    match ron::ser::to_string_pretty(tournament, ron::ser::PrettyConfig::default()) {
        Ok(string) => match File::create(path) {
            Ok(mut file) => {
                if let Err(error) = file.write_all(string.as_bytes()) {
                    error!("save file (3): {error}");
                }
            }
            Err(error) => error!("save file (2): {error}"),
        },
        Err(error) => error!("save file (1): {error}"),
    }
}
