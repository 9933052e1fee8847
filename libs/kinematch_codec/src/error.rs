use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("could not read input: {0}")]
    IOError(#[from] std::io::Error),

    #[error("line {line}: invalid json: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("trace record {record} is timestamped before its predecessor")]
    OutOfOrder { record: usize },

    #[error("grid file does not contain a bounds header")]
    MissingBounds,

    #[error("could not write gpx: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("placeholder time {0} is out of range")]
    Timestamp(i64),
}
