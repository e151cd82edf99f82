use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("malformed task {id}: {reason}")]
    Malformed { id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write output line: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("invoked tasks ({invoked}) exceed total tasks ({total})")]
    InvokedExceedsTotal { invoked: u64, total: u64 },
    #[error("success tasks ({success}) exceed invoked tasks ({invoked})")]
    SuccessExceedsInvoked { success: u64, invoked: u64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("stats require at least one sample")]
    Empty,
    #[error("invalid standard deviation {0}")]
    InvalidDeviation(f64),
    #[error("invalid mean {0}")]
    InvalidMean(f64),
}

#[derive(Debug, Error)]
pub enum ShowError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("json encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type ShowResult<T> = Result<T, ShowError>;
