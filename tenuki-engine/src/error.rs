use std::fmt;

/// Construction-time failure. Fatal and surfaced immediately; the engine
/// never recovers from a bad configuration internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedSize(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedSize(size) => {
                write!(f, "unsupported board size: {size}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Move-level rejection. Routine player input, reported as a value and
/// never allowed to leave partial state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoError {
    NotOnBoard,
    Occupied,
    KoViolation,
    Suicide,
    GameOver,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::NotOnBoard => write!(f, "point is not on the board"),
            GoError::Occupied => write!(f, "point is occupied"),
            GoError::KoViolation => write!(f, "ko violation"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::GameOver => write!(f, "game is over"),
        }
    }
}

impl std::error::Error for GoError {}
