// Domain-level errors for duel workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelError {
    NotFound,
    InvalidState,
    AlreadyOwned,
    Uncapturable,
    NotAdjacent,
    InsufficientResources,
    StorageFailure,
}
