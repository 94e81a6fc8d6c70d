use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to read leaderboard {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write leaderboard {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to delete leaderboard {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("expected `name,score` but got {fields} field(s)")]
    FieldCount { fields: usize },

    #[error("score `{0}` is not an integer")]
    Score(String),

    #[error("line is not valid UTF-8")]
    Encoding,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Please enter a username.")]
    Empty,

    #[error("Maximum {max} characters allowed.")]
    TooLong { max: usize },

    #[error("Usernames cannot contain commas.")]
    Comma,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("Please click on the map to make a guess first!")]
    NoGuess,

    #[error("No round is in progress.")]
    NotRunning,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HintError {
    #[error("Hint available in {remaining}s.")]
    NotReady { remaining: u32 },

    #[error("Hint already used this round.")]
    AlreadyUsed,

    #[error("You need at least {cost} points for a hint.")]
    InsufficientPoints { cost: i32 },

    #[error("No round is in progress.")]
    NotRunning,
}
