use std::fmt;

#[derive(Debug)]
pub enum BalanceError {
    InvalidPoolSize { expected: usize, found: usize },
    UnknownPlayer(String),
    DuplicatePlayer(String),
    NoValidPairing { trials: u64 },
    InvalidConfig(String),
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BalanceError::InvalidPoolSize { expected, found } => {
                write!(f, "Invalid pool size: expected {}, found {}", expected, found)
            }
            BalanceError::UnknownPlayer(name) => {
                write!(f, "Unknown player: {}", name)
            }
            BalanceError::DuplicatePlayer(name) => {
                write!(f, "Duplicate player in pool: {}", name)
            }
            BalanceError::NoValidPairing { trials } => {
                write!(f, "No valid pairing found after {} trials", trials)
            }
            BalanceError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for BalanceError {}

pub type Result<T> = std::result::Result<T, BalanceError>;
