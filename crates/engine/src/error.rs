use nestris_core::LockError;

/// Frame step failures
///
/// These only arise from an inconsistent aggregate (for example a state built
/// by hand for a scenario); a state produced by the engine itself never hits
/// them. The state passed to the failing call is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("lock failed: {0}")]
    Lock(#[from] LockError),

    #[error("no active piece while playing")]
    NoActivePiece,

    #[error("no next piece queued; start a game first")]
    NotStarted,
}
