use madness_bracket::{
    VOTERS,
    character::CharacterId,
    engine::VoteOutcome,
    error::BracketError,
    matchup::{BRACKET_SEEDS, MatchupId},
    participant::PARTICIPANTS,
    status::Status,
    tournament::Tournament,
};

fn slugs() -> impl Iterator<Item = &'static str> {
    PARTICIPANTS.iter().map(|(_, slug)| *slug)
}

fn seed_id(tournament: &Tournament, seed: u8) -> anyhow::Result<CharacterId> {
    tournament
        .character_by_seed(seed)
        .map(|character| character.id)
        .ok_or_else(|| anyhow::Error::msg(format!("no seed {seed}")))
}

fn matchup_id(tournament: &Tournament, round: u8, position: u8) -> anyhow::Result<MatchupId> {
    tournament
        .matchup_at(round, position)
        .map(|matchup| matchup.id)
        .ok_or_else(|| anyhow::Error::msg(format!("no matchup at {round} {position}")))
}

fn round_one_seeds(tournament: &Tournament) -> Vec<(Option<u8>, Option<u8>)> {
    let seed = |id: Option<CharacterId>| {
        id.and_then(|id| tournament.character(id))
            .map(|character| character.seed)
    };

    tournament
        .round(1)
        .into_iter()
        .map(|matchup| (seed(matchup.top), seed(matchup.bottom)))
        .collect()
}

#[test]
fn four_to_two_waits_for_the_sixth_vote() -> anyhow::Result<()> {
    let mut tournament = Tournament::new();
    tournament.create_tournament()?;

    let id = matchup_id(&tournament, 1, 0)?;
    let seed_1 = seed_id(&tournament, 1)?;
    let seed_32 = seed_id(&tournament, 32)?;

    let choices = [seed_1, seed_1, seed_1, seed_1, seed_32, seed_32];
    let mut outcomes = Vec::new();
    for (slug, character) in slugs().zip(choices) {
        outcomes.push(tournament.cast_vote(id, slug, character)?);

        let status = tournament.matchup(id).map(|matchup| matchup.status);
        if outcomes.len() < VOTERS {
            assert_eq!(status, Some(Status::Active));
        } else {
            assert_eq!(status, Some(Status::Decided));
        }
    }

    assert_eq!(
        outcomes.get(3),
        Some(&VoteOutcome::Pending {
            votes_in: 4,
            total_needed: 6
        })
    );
    assert_eq!(
        outcomes.last(),
        Some(&VoteOutcome::Decided {
            winner: seed_1,
            champion: false
        })
    );
    assert_eq!(
        tournament.matchup(id).and_then(|matchup| matchup.winner),
        Some(seed_1)
    );

    let next = tournament.matchup_at(2, 0);
    assert_eq!(next.and_then(|matchup| matchup.top), Some(seed_1));
    assert_eq!(next.and_then(|matchup| matchup.bottom), None);
    assert_eq!(next.map(|matchup| matchup.status), Some(Status::Locked));

    Ok(())
}

#[test]
fn three_three_goes_to_seed_5_over_seed_12() -> anyhow::Result<()> {
    let mut tournament = Tournament::new();
    tournament.create_tournament()?;

    // Advance seed 5 and seed 12 out of round one: positions 6 and 7 feed
    // round two position 3.
    for position in 0..16 {
        let id = matchup_id(&tournament, 1, position)?;
        let top = tournament
            .matchup(id)
            .and_then(|matchup| matchup.top)
            .ok_or_else(|| anyhow::Error::msg("empty slot"))?;

        for slug in slugs() {
            tournament.cast_vote(id, slug, top)?;
        }
    }

    let seed_5 = seed_id(&tournament, 5)?;
    let seed_12 = seed_id(&tournament, 12)?;
    let id = matchup_id(&tournament, 2, 3)?;
    let matchup = tournament.matchup(id).cloned();
    assert_eq!(matchup.as_ref().and_then(|matchup| matchup.top), Some(seed_5));
    assert_eq!(matchup.as_ref().and_then(|matchup| matchup.bottom), Some(seed_12));
    assert_eq!(matchup.map(|matchup| matchup.status), Some(Status::Active));

    // Seed 12 gets its votes in first.
    let choices = [seed_12, seed_12, seed_12, seed_5, seed_5, seed_5];
    for (slug, character) in slugs().zip(choices) {
        tournament.cast_vote(id, slug, character)?;
    }

    assert_eq!(
        tournament.matchup(id).and_then(|matchup| matchup.winner),
        Some(seed_5)
    );
    // Position 3 is odd, so the winner takes the bottom slot.
    assert_eq!(
        tournament.matchup_at(3, 1).and_then(|matchup| matchup.bottom),
        Some(seed_5)
    );

    Ok(())
}

#[test]
fn reset_then_reseed_reproduces_the_pairings() -> anyhow::Result<()> {
    let mut tournament = Tournament::new();
    tournament.create_tournament()?;
    let before = round_one_seeds(&tournament);

    let id = matchup_id(&tournament, 1, 3)?;
    let seed_9 = seed_id(&tournament, 9)?;
    for slug in slugs() {
        tournament.cast_vote(id, slug, seed_9)?;
    }

    tournament.reset_tournament();
    assert_eq!(tournament.characters().count(), 0);
    assert_eq!(tournament.participants().count(), 0);
    assert!(tournament.matchups().is_empty());
    assert!(tournament.votes().is_empty());

    tournament.create_tournament()?;
    let after = round_one_seeds(&tournament);

    assert_eq!(before, after);
    let expected: Vec<_> = BRACKET_SEEDS
        .iter()
        .map(|(top, bottom)| (Some(*top), Some(*bottom)))
        .collect();
    assert_eq!(after, expected);

    Ok(())
}

#[test]
fn status_never_moves_backwards() -> anyhow::Result<()> {
    let mut tournament = Tournament::new();
    tournament.create_tournament()?;

    let mut last: Vec<_> = tournament
        .matchups()
        .iter()
        .map(|matchup| (matchup.id, matchup.status))
        .collect();

    // Lower seeds lose every matchup they can.
    while let Some(round) = tournament.current_round() {
        let active: Vec<_> = tournament
            .round(round)
            .into_iter()
            .filter(|matchup| matchup.status == Status::Active)
            .map(|matchup| matchup.id)
            .collect();

        for id in active {
            let Some(matchup) = tournament.matchup(id) else {
                continue;
            };
            let (Some(top), Some(bottom)) = (matchup.top, matchup.bottom) else {
                continue;
            };

            let seed = |id| tournament.character(id).map(|character| character.seed);
            let underdog = if seed(top) > seed(bottom) { top } else { bottom };

            for slug in slugs() {
                tournament.cast_vote(id, slug, underdog)?;

                let now: Vec<_> = tournament
                    .matchups()
                    .iter()
                    .map(|matchup| (matchup.id, matchup.status))
                    .collect();
                for ((id, before), (_, after)) in last.iter().zip(&now) {
                    assert!(before <= after, "matchup {id} went from {before} to {after}");
                }
                last = now;
            }
        }
    }

    let champion = tournament.champion()?.map(|champion| champion.seed);
    assert_eq!(champion, Some(32));

    Ok(())
}

#[test]
fn errors_are_surfaced() -> anyhow::Result<()> {
    let mut tournament = Tournament::new();
    let id = MatchupId(0);

    assert_eq!(
        tournament.cast_vote(id, "josh", CharacterId(0)),
        Err(BracketError::NotSeeded)
    );

    tournament.create_tournament()?;
    assert_eq!(
        tournament.create_tournament(),
        Err(BracketError::AlreadySeeded)
    );

    let locked = matchup_id(&tournament, 3, 0)?;
    let error = tournament.cast_vote(locked, "josh", CharacterId(0));
    assert_eq!(
        error.map_err(|error| error.to_string()),
        Err(format!("bracket: matchup {locked} is locked"))
    );

    Ok(())
}
