use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),

    #[error("generation backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("generation backend returned an empty reply")]
    EmptyReply,

    #[error("generation failed: {0}")]
    Backend(String),
}
