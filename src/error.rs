use std::result;

use thiserror::Error;

use crate::store;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] store::Error),
    #[error("malformed session token: {0}")]
    MalformedToken(String),
    #[error("invalid authentication response: {0}")]
    InvalidAuthResponse(String),
    #[error("the remote api rejected the session token")]
    Unauthorized,
}

pub type Result<T> = result::Result<T, Error>;
