#[cfg(feature = "bench")]
use std::{hint::black_box, time::Duration};

#[cfg(feature = "bench")]
use criterion::{Criterion, criterion_group, criterion_main};

#[cfg(feature = "bench")]
use madness_bracket::{participant::PARTICIPANTS, status::Status, tournament::Tournament};

/// Plays the whole bracket, every voter backing the top slot.
#[cfg(feature = "bench")]
fn play_out() -> anyhow::Result<Tournament> {
    let mut tournament = Tournament::new();
    tournament.create_tournament()?;

    while let Some(round) = tournament.current_round() {
        let open: Vec<_> = tournament
            .round(round)
            .into_iter()
            .filter(|matchup| matchup.status == Status::Active)
            .filter_map(|matchup| Some((matchup.id, matchup.top?)))
            .collect();

        for (id, top) in open {
            for (_, slug) in PARTICIPANTS {
                tournament.cast_vote(id, slug, top)?;
            }
        }
    }

    Ok(tournament)
}

#[cfg(feature = "bench")]
fn bracket_play_outs(c: &mut Criterion) {
    c.bench_function("bracket_play_outs", |b| {
        b.iter(|| black_box(play_out().unwrap()));
    });
}

#[cfg(feature = "bench")]
criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = bracket_play_outs
}

#[cfg(feature = "bench")]
criterion_main!(benches);

#[cfg(not(feature = "bench"))]
fn main() {
    eprintln!("You must enable pass `--features=bench`");
}
