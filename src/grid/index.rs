use crate::grid::{CellId, GridBounds, GridError};
use crate::primitives::{ClosestStreetResult, Endpoint, Segment, TimedPosition};

use codec::{GridFile, SegmentRecord};
use itertools::Itertools;
use kinematch_geo::{checked_point, closest_point_on_segment, haversine};
use log::{debug, info};
use rustc_hash::FxHashMap;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Segments bucketed into the square cells of a fixed bounding box.
///
/// Queries only ever inspect the 3x3 block of cells around the query
/// point, so the cell size must be at least the largest distance a
/// trace point may lie from its road.
#[derive(Debug, Clone)]
pub struct StreetGrid {
    bounds: GridBounds,
    cells: FxHashMap<CellId, Vec<Segment>>,
}

impl StreetGrid {
    pub fn new(bounds: GridBounds) -> Self {
        StreetGrid {
            bounds,
            cells: FxHashMap::default(),
        }
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Number of segment placements across all cells.
    pub fn size(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn insert(&mut self, cell: CellId, segment: Segment) {
        self.cells.entry(cell).or_default().push(segment);
    }

    /// Places a segment in every cell touched by its endpoints and midpoint.
    pub fn insert_segment(&mut self, segment: Segment) {
        let start = segment.start.position;
        let end = segment.end.position;
        let middle = geo::Point::new((start.x() + end.x()) / 2.0, (start.y() + end.y()) / 2.0);

        let cells = [start, middle, end]
            .into_iter()
            .map(|point| self.bounds.cell_of(point))
            .unique()
            .collect::<Vec<_>>();

        for cell in cells {
            self.insert(cell, segment);
        }
    }

    pub fn from_records(file: GridFile) -> Result<Self, GridError> {
        let mut grid = StreetGrid::new(GridBounds::try_from(file.bounds)?);

        for cell in file.cells {
            let id = CellId::new(cell.cell_id[0], cell.cell_id[1]);
            for record in cell.segments {
                grid.insert(id, segment_from_record(&record)?);
            }
        }

        info!(
            "Loaded street grid with {} cells holding {} segments",
            grid.cells.len(),
            grid.size()
        );

        Ok(grid)
    }

    /// Finds up to `k` roads closest to `point`, nearest first.
    ///
    /// Each road (way) is returned at most once, through whichever of its
    /// segments passes closest to the point. The snapped position carries
    /// the timestamp of the query.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = Level::DEBUG))]
    pub fn nearest_roads(&self, point: &TimedPosition, k: usize) -> Vec<ClosestStreetResult> {
        let center = self.bounds.cell_of(point.position);

        let roads = center
            .neighbourhood()
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .map(|segment| {
                let snapped = closest_point_on_segment(
                    point.position,
                    segment.start.position,
                    segment.end.position,
                );

                let distance = haversine(point.position, snapped);
                let result = ClosestStreetResult {
                    position: point.moved_to(snapped),
                    segment: *segment,
                };

                (distance, result)
            })
            .sorted_by(|(a, _), (b, _)| a.total_cmp(b))
            .unique_by(|(_, result)| result.segment.way_id)
            .take(k)
            .map(|(_, result)| result)
            .collect::<Vec<_>>();

        debug!(
            "Found {} roads around ({}, {}) in cell {:?}",
            roads.len(),
            point.lat(),
            point.lng(),
            center
        );

        roads
    }
}

fn segment_from_record(record: &SegmentRecord) -> Result<Segment, GridError> {
    let endpoint = |index: usize| -> Result<Endpoint, GridError> {
        let raw = record.endpoints[index];
        let position = checked_point(raw.lat, raw.lon).map_err(|source| GridError::InvalidEndpoint {
            way_id: record.way_id,
            source,
        })?;

        Ok(Endpoint {
            node_id: record.node_ids[index],
            position,
        })
    };

    Ok(Segment {
        way_id: record.way_id,
        start: endpoint(0)?,
        end: endpoint(1)?,
    })
}
