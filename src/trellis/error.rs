use thiserror::Error;

/// Why a trace could not be matched to its end.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFailure {
    #[error("no trace points were given")]
    EmptyTrace,

    #[error("no road candidates near trace point {index}")]
    NoCandidates { index: usize },

    #[error("no speed hypothesis survives beyond trace point {index}")]
    NoSurvivors { index: usize },
}

impl StepFailure {
    /// The trace point at which matching stopped.
    pub fn index(&self) -> Option<usize> {
        match self {
            StepFailure::EmptyTrace => None,
            StepFailure::NoCandidates { index } | StepFailure::NoSurvivors { index } => Some(*index),
        }
    }
}
