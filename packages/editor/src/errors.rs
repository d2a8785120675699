//! Error types for the editor

use thiserror::Error;

use crate::backend::BackendError;
use crate::publish::PublishBlocker;

#[derive(Debug, Error)]
pub enum EditorError {
    /// A publish gate failed locally; no request was sent.
    #[error("publish blocked: {0}")]
    PublishBlocked(#[from] PublishBlocker),

    /// The backend rejected or failed the mutation; local state is
    /// unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
