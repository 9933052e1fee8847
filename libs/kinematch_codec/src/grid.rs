//! Spatial grid records.
//!
//! The first JSON line holds the grid bounds, every following line a
//! single cell with the segments assigned to it. Anything preceding the
//! bounds which is not a JSON object is ignored.

use crate::error::CodecError;
use crate::lines::content_lines;

use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBoundsRecord {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub cell_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub way_id: i64,
    pub node_ids: [i64; 2],
    pub endpoints: [EndpointRecord; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// `[row, col]`, where the row indexes latitude and the column longitude.
    pub cell_id: [i64; 2],
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridFile {
    pub bounds: GridBoundsRecord,
    pub cells: Vec<CellRecord>,
}

pub fn read_grid<R: BufRead>(reader: R) -> Result<GridFile, CodecError> {
    let mut bounds: Option<GridBoundsRecord> = None;
    let mut cells = Vec::new();

    for line in content_lines(reader) {
        let (number, content) = line?;

        match bounds {
            None if !content.starts_with('{') => {
                log::debug!("Skipping preamble on line {number}");
            }
            None => {
                let header: GridBoundsRecord = serde_json::from_str(&content)
                    .map_err(|source| CodecError::Json { line: number, source })?;

                if !(header.cell_size > 0.0) {
                    return Err(CodecError::Malformed {
                        line: number,
                        reason: format!("cell size must be positive, got {}", header.cell_size),
                    });
                }

                bounds = Some(header);
            }
            Some(_) => {
                let cell: CellRecord = serde_json::from_str(&content)
                    .map_err(|source| CodecError::Json { line: number, source })?;
                cells.push(cell);
            }
        }
    }

    let bounds = bounds.ok_or(CodecError::MissingBounds)?;
    log::info!("Decoded {} grid cells", cells.len());

    Ok(GridFile { bounds, cells })
}
