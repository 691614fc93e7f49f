use std::collections::TryReserveError;

/// Failures while growing a tree. Everything else is a caller bug and panics.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("tree cannot address more than {max} nodes")]
    Overflow { max: usize },
    #[error("failed to grow tree storage")]
    Alloc(#[from] TryReserveError),
}
