use thiserror::Error;

use crate::Role;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dropdown wrap or background not found! Missing `{role}`")]
    MissingElement { role: Role },
    #[error("{triggers} dropdown links but {contents} dropdown contents")]
    PairingMismatch { triggers: usize, contents: usize },
    #[error("Invalid dropdown config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("DOM error: {0}")]
    Dom(String),
}
