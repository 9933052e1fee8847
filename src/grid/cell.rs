use crate::grid::GridError;
use codec::GridBoundsRecord;
use geo::Point;

/// Position of a cell within the grid.
/// Rows index latitude, columns index longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: i64,
    pub col: i64,
}

impl CellId {
    pub const fn new(row: i64, col: i64) -> Self {
        CellId { row, col }
    }

    /// The 3x3 block of cells centered on this one.
    pub fn neighbourhood(self) -> impl Iterator<Item = CellId> {
        (-1..=1).flat_map(move |dr| (-1..=1).map(move |dc| CellId::new(self.row + dr, self.col + dc)))
    }
}

/// Fixed bounding box covered by the grid, and the side of each square cell (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub cell_size: f64,
}

impl GridBounds {
    pub fn new(
        min_lng: f64,
        max_lng: f64,
        min_lat: f64,
        max_lat: f64,
        cell_size: f64,
    ) -> Result<Self, GridError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(GridError::InvalidCellSize(cell_size));
        }

        if !(min_lng < max_lng && min_lat < max_lat) {
            return Err(GridError::InvalidBounds);
        }

        Ok(GridBounds {
            min_lng,
            max_lng,
            min_lat,
            max_lat,
            cell_size,
        })
    }

    /// The cell a position falls into. Positions outside the bounds
    /// map onto cells outside of it, which are simply empty.
    pub fn cell_of(&self, point: Point) -> CellId {
        let row = ((point.y() - self.min_lat) / self.cell_size).floor() as i64;
        let col = ((point.x() - self.min_lng) / self.cell_size).floor() as i64;

        CellId::new(row, col)
    }
}

impl TryFrom<GridBoundsRecord> for GridBounds {
    type Error = GridError;

    fn try_from(value: GridBoundsRecord) -> Result<Self, Self::Error> {
        GridBounds::new(
            value.min_lon,
            value.max_lon,
            value.min_lat,
            value.max_lat,
            value.cell_size,
        )
    }
}
