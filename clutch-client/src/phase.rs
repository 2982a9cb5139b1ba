//! Reorder gesture state machine
//!
//! ```text
//! Idle --MoveAccepted--> OptimisticallyApplied
//! OptimisticallyApplied --PersistSucceeded--> PendingReconcile --ReloadFinished--> Idle
//! OptimisticallyApplied --PersistFailed--> RollingBack --ReloadFinished--> Idle
//! Idle --MoveBlocked--> Idle
//! ```
//!
//! The reducer knows nothing about views or networking so every transition
//! can be checked on its own.

use crate::error::InvalidTransition;

/// Where the current reorder gesture stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderPhase {
    #[default]
    Idle,
    /// Local swap applied, rank writes in flight
    OptimisticallyApplied,
    /// Writes confirmed, waiting for the reconciling reload
    PendingReconcile,
    /// A write failed, forced reload in flight
    RollingBack,
}

/// Inputs to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderEvent {
    MoveAccepted,
    /// Move rejected because a filter is active
    MoveBlocked,
    PersistSucceeded,
    PersistFailed,
    /// Reload done, whether or not the fetch succeeded
    ReloadFinished,
}

impl ReorderPhase {
    /// Next phase for `event`, or an error if the event is not legal here
    pub fn next(self, event: ReorderEvent) -> Result<Self, InvalidTransition> {
        use ReorderEvent::*;
        use ReorderPhase::*;

        match (self, event) {
            (Idle, MoveAccepted) => Ok(OptimisticallyApplied),
            (Idle, MoveBlocked) => Ok(Idle),
            (OptimisticallyApplied, PersistSucceeded) => Ok(PendingReconcile),
            (OptimisticallyApplied, PersistFailed) => Ok(RollingBack),
            (PendingReconcile, ReloadFinished) | (RollingBack, ReloadFinished) => Ok(Idle),
            (phase, event) => Err(InvalidTransition { phase, event }),
        }
    }

    /// True while a gesture owns the view
    pub fn is_busy(self) -> bool {
        self != ReorderPhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let phase = ReorderPhase::Idle
            .next(ReorderEvent::MoveAccepted)
            .and_then(|p| p.next(ReorderEvent::PersistSucceeded))
            .unwrap();
        assert_eq!(phase, ReorderPhase::PendingReconcile);
        assert!(phase.is_busy());
        assert_eq!(
            phase.next(ReorderEvent::ReloadFinished),
            Ok(ReorderPhase::Idle)
        );
    }

    #[test]
    fn test_failure_path() {
        let phase = ReorderPhase::Idle
            .next(ReorderEvent::MoveAccepted)
            .and_then(|p| p.next(ReorderEvent::PersistFailed))
            .unwrap();
        assert_eq!(phase, ReorderPhase::RollingBack);
        assert_eq!(
            phase.next(ReorderEvent::ReloadFinished),
            Ok(ReorderPhase::Idle)
        );
    }

    #[test]
    fn test_blocked_stays_idle() {
        assert_eq!(
            ReorderPhase::Idle.next(ReorderEvent::MoveBlocked),
            Ok(ReorderPhase::Idle)
        );
        assert!(!ReorderPhase::Idle.is_busy());
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        let cases = [
            (ReorderPhase::Idle, ReorderEvent::PersistSucceeded),
            (ReorderPhase::Idle, ReorderEvent::ReloadFinished),
            (ReorderPhase::OptimisticallyApplied, ReorderEvent::MoveAccepted),
            (ReorderPhase::OptimisticallyApplied, ReorderEvent::ReloadFinished),
            (ReorderPhase::PendingReconcile, ReorderEvent::PersistFailed),
            (ReorderPhase::RollingBack, ReorderEvent::MoveBlocked),
        ];

        for (phase, event) in cases {
            let err = phase.next(event).unwrap_err();
            assert_eq!(err, InvalidTransition { phase, event });
        }
    }
}
