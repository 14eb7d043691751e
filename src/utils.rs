use std::{env, fs, io::Write, path::PathBuf};

use chrono::Utc;
use env_logger::Builder;
use log::LevelFilter;

use crate::HOME;

/// Logs at the Info level, or Debug when `debug` is set, unless `RUST_LOG`
/// says otherwise. Under systemd the timestamp is left to the journal.
pub fn init_logger(name: &str, debug: bool, systemd: bool) {
    let mut builder = Builder::new();

    if systemd {
        builder.format(|formatter, record| {
            writeln!(formatter, "[{}]: {}", record.level(), record.args())
        });
    } else {
        builder.format(|formatter, record| {
            writeln!(
                formatter,
                "{} [{}] ({}): {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S %z"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    }

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else if debug {
        builder.filter(Some(name), LevelFilter::Debug);
        builder.filter(Some("madness_bracket"), LevelFilter::Debug);
    } else {
        builder.filter(None, LevelFilter::Info);
    }

    builder.init();
}

/// `file` inside this program's data directory.
#[must_use]
pub fn data_file(file: &str) -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_default();
    path.push(HOME);
    path.push(file);
    path
}

/// # Errors
///
/// If the directory can't be created.
pub fn create_data_folder() -> anyhow::Result<()> {
    let mut path = dirs::data_dir().unwrap_or_default();
    path.push(HOME);
    fs::create_dir_all(path)?;
    Ok(())
}
