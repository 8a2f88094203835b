use super::Zone;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Grid size must be at least 1 (got {grid_size})")]
    GridTooSmall { grid_size: usize },
    #[error("Area bounds must be whole numbers with 0 < min_area <= max_area (got {min_area}..{max_area})")]
    InvalidAreaBounds { min_area: f64, max_area: f64 },
    #[error("Expected {expected} manual areas (grid_size²), got {actual}")]
    ManualAreaCount { expected: usize, actual: usize },
    #[error("Plot {plot_id} has a non-positive area ({area})")]
    NonPositiveArea { plot_id: usize, area: f64 },
    #[error("Invalid {zone} range ({min}, {max}): need 0 <= min <= max <= 100")]
    InvalidRange { zone: Zone, min: f64, max: f64 },
    #[error("Invalid search parameters: {0}")]
    InvalidSearchParams(String),
    #[error("Assignment has {actual} zones but the grid has {expected} assignable cells")]
    AssignmentLength { expected: usize, actual: usize },
    #[error("Plot {plot_id} does not exist")]
    UnknownPlot { plot_id: usize },
    #[error("Plot {plot_id} appears more than once")]
    DuplicatePlot { plot_id: usize },
    #[error("Coordinate ({x}, {y}) is outside the largest supported grid ({max_grid_size})")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        max_grid_size: usize,
    },
    #[error("Coordinate ({x}, {y}) appears more than once")]
    DuplicateCoordinate { x: usize, y: usize },
    #[error("Unknown zone '{0}'")]
    UnknownZone(String),
    #[error("Malformed plot table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },
}
