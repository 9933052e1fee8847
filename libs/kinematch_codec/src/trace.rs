use crate::error::CodecError;
use crate::lines::decode_lines;

use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// A single GPS fix, with its timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub lat: f64,
    pub lon: f64,
    pub timestamp: i64,
}

/// Reads a JSON Lines trace. Timestamps must not decrease.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, CodecError> {
    let records: Vec<TraceRecord> = decode_lines(reader)?;

    if let Some(index) = records
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(CodecError::OutOfOrder { record: index + 1 });
    }

    Ok(records)
}
