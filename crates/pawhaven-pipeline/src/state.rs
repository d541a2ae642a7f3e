//! Per-attempt submission state machine.

use pawhaven_core::models::StoredPet;
use pawhaven_core::SubmissionError;

/// Terminal result of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(StoredPet),
    Failed(SubmissionError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failed(error) => Some(error),
        }
    }

    pub fn stored(&self) -> Option<&StoredPet> {
        match self {
            Outcome::Success(stored) => Some(stored),
            Outcome::Failed(_) => None,
        }
    }
}

/// Where a form is in its submission lifecycle.
///
/// `Idle -> Uploading -> Persisting -> Settled`. Any failure short-circuits to
/// `Settled(Failed)`; `Persisting` is only reachable after a successful upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Persisting,
    Settled(Outcome),
}

/// Fieldless mirror of [`Phase`] used for the transition trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Uploading,
    Persisting,
    Settled,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Uploading => PhaseKind::Uploading,
            Phase::Persisting => PhaseKind::Persisting,
            Phase::Settled(_) => PhaseKind::Settled,
        }
    }

    /// True while a request is outstanding; the submit control is disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::Uploading | Phase::Persisting)
    }
}

/// What one call to `submit` did.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReport {
    pub outcome: Outcome,
    /// Phases visited in order, starting with the phase the attempt began in
    pub trail: Vec<PhaseKind>,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn visited(&self, kind: PhaseKind) -> bool {
        self.trail.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_phases() {
        assert!(!Phase::Idle.is_in_flight());
        assert!(Phase::Uploading.is_in_flight());
        assert!(Phase::Persisting.is_in_flight());
        assert!(!Phase::Settled(Outcome::Failed(SubmissionError::InFlight)).is_in_flight());
    }

    #[test]
    fn outcome_accessors() {
        let failed = Outcome::Failed(SubmissionError::http_status(500));
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some(&SubmissionError::http_status(500)));
        assert!(failed.stored().is_none());
    }
}
