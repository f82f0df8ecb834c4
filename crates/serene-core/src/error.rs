use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("client id must not be blank")]
    BlankClientId,
}
