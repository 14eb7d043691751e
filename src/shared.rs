use std::sync::{Arc, Mutex};

use crate::{
    character::{CharacterField, CharacterId, Update},
    engine::VoteOutcome,
    error::BracketError,
    matchup::MatchupId,
    participant::Participant,
    tournament::{Seeded, Tournament},
    view::MatchupView,
};

/// A tournament shared between threads.
///
/// Every call holds the lock for its whole duration, so votes in the same
/// matchup, and decisions in sibling matchups of a round, never interleave.
#[derive(Clone, Debug, Default)]
pub struct SharedTournament(Arc<Mutex<Tournament>>);

impl SharedTournament {
    #[must_use]
    pub fn new(tournament: Tournament) -> Self {
        Self(Arc::new(Mutex::new(tournament)))
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut Tournament) -> Result<T, BracketError>,
    ) -> Result<T, BracketError> {
        let mut tournament = self.0.lock().map_err(|_| BracketError::Poisoned)?;
        f(&mut tournament)
    }

    /// # Errors
    ///
    /// See [`Tournament::create_tournament`].
    pub fn create_tournament(&self) -> Result<Seeded, BracketError> {
        self.with(Tournament::create_tournament)
    }

    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn reset_tournament(&self) -> Result<(), BracketError> {
        self.with(|tournament| {
            tournament.reset_tournament();
            Ok(())
        })
    }

    /// # Errors
    ///
    /// See [`Tournament::cast_vote`].
    pub fn cast_vote(
        &self,
        matchup: MatchupId,
        participant: &str,
        character: CharacterId,
    ) -> Result<VoteOutcome, BracketError> {
        self.with(|tournament| tournament.cast_vote(matchup, participant, character))
    }

    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn batch_update(
        &self,
        field: CharacterField,
        updates: &[Update],
    ) -> Result<usize, BracketError> {
        self.with(|tournament| Ok(tournament.batch_update(field, updates)))
    }

    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn bracket(&self) -> Result<Vec<MatchupView>, BracketError> {
        self.with(|tournament| Ok(tournament.bracket()))
    }

    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn matchup(&self, id: MatchupId) -> Result<Option<MatchupView>, BracketError> {
        self.with(|tournament| Ok(tournament.matchup_view(id)))
    }

    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn participants(&self) -> Result<Vec<Participant>, BracketError> {
        self.with(|tournament| Ok(tournament.participants().cloned().collect()))
    }

    /// A copy of the whole state, for saving.
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn snapshot(&self) -> Result<Tournament, BracketError> {
        self.with(|tournament| Ok(tournament.clone()))
    }
}
