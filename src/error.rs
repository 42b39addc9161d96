use crate::command::ParseError;
use std::fmt;

/// Something a singular lookup was expected to find.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Missing {
    Student(String),
    Project(String),
    Grade { github: String, title: String },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Missing::Student(github) => write!(f, "no student with GitHub account {github}"),
            Missing::Project(title) => write!(f, "no project titled {title}"),
            Missing::Grade { github, title } => {
                write!(f, "{github} has no grade for project {title}")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(Missing),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Only a web front end consumes this; the console prints the message instead.
#[allow(dead_code)]
impl Error {
    /// HTTP status a web front end should answer with for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Validation(_) => 400,
            Error::Database(_) => 500,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Validation(e.to_string())
    }
}
