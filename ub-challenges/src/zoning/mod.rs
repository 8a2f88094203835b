mod annotate;
mod error;
mod evaluate;
mod fitness;
mod render;
mod summary;
mod table;

pub use annotate::*;
pub use error::InputError;
pub use evaluate::*;
pub use fitness::*;
pub use render::LayoutMap;
pub use summary::zoning_summary;
pub use table::*;

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};
use ub_structs::{
    config::{PercentRange, ZoningSettings},
    core::PlotRecord,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Unassigned,
    Road,
    Residential,
    Commercial,
    Green,
}

impl Zone {
    /// Zones the search is allowed to place on a non-road cell, in gene order.
    pub const ASSIGNABLE: [Zone; 3] = [Zone::Residential, Zone::Commercial, Zone::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Unassigned => "Unassigned",
            Zone::Road => "Road",
            Zone::Residential => "Residential",
            Zone::Commercial => "Commercial",
            Zone::Green => "Green",
        }
    }

    pub fn is_assignable(&self) -> bool {
        Zone::ASSIGNABLE.contains(self)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unassigned" => Ok(Zone::Unassigned),
            "Road" => Ok(Zone::Road),
            "Residential" => Ok(Zone::Residential),
            "Commercial" => Ok(Zone::Commercial),
            "Green" => Ok(Zone::Green),
            other => Err(InputError::UnknownZone(other.to_string())),
        }
    }
}

/// Largest lattice side accepted when rebuilding a grid from table rows.
pub const MAX_GRID_SIZE: usize = 1024;

/// A cell lies on a road iff it is on the boundary or either coordinate is a multiple of 3.
pub fn is_road(x: usize, y: usize, grid_size: usize) -> bool {
    x == 0
        || y == 0
        || x + 1 == grid_size
        || y + 1 == grid_size
        || x % 3 == 0
        || y % 3 == 0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cell {
    pub plot_id: usize,
    pub x: usize,
    pub y: usize,
    pub area: f64,
    pub zone: Zone,
    pub subtype: String,
    pub reason: String,
}

impl Cell {
    pub fn to_record(&self) -> PlotRecord {
        PlotRecord {
            plot_id: self.plot_id,
            x: self.x,
            y: self.y,
            area: self.area,
            zone: self.zone.to_string(),
            subtype: self.subtype.clone(),
            reason: self.reason.clone(),
        }
    }
}

impl TryFrom<&PlotRecord> for Cell {
    type Error = InputError;

    fn try_from(record: &PlotRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            plot_id: record.plot_id,
            x: record.x,
            y: record.y,
            area: record.area,
            zone: record.zone.parse()?,
            subtype: record.subtype.clone(),
            reason: record.reason.clone(),
        })
    }
}

/// Target percentage bands, validated on construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConstraintRanges {
    pub residential: PercentRange,
    pub commercial: PercentRange,
    pub green: PercentRange,
}

impl ConstraintRanges {
    pub fn new(
        residential: PercentRange,
        commercial: PercentRange,
        green: PercentRange,
    ) -> Result<Self, InputError> {
        let ranges = Self {
            residential,
            commercial,
            green,
        };
        for zone in Zone::ASSIGNABLE {
            let (min, max) = ranges.for_zone(zone);
            let in_bounds = |v: f64| (0.0..=100.0).contains(&v);
            if !in_bounds(min) || !in_bounds(max) || min > max {
                return Err(InputError::InvalidRange { zone, min, max });
            }
        }
        Ok(ranges)
    }

    pub fn from_settings(settings: &ZoningSettings) -> Result<Self, InputError> {
        Self::new(settings.res_range, settings.com_range, settings.green_range)
    }

    pub fn for_zone(&self, zone: Zone) -> PercentRange {
        match zone {
            Zone::Residential => self.residential,
            Zone::Commercial => self.commercial,
            Zone::Green => self.green,
            Zone::Unassigned | Zone::Road => (0.0, 100.0),
        }
    }
}

/// Validates everything a run needs before any search work starts.
pub fn validate_settings(settings: &ZoningSettings) -> Result<ConstraintRanges, InputError> {
    let grid_size = settings.grid_size;
    if grid_size == 0 {
        return Err(InputError::GridTooSmall { grid_size });
    }
    match settings.manual_areas() {
        Some(areas) => {
            let expected = grid_size * grid_size;
            if areas.len() != expected {
                return Err(InputError::ManualAreaCount {
                    expected,
                    actual: areas.len(),
                });
            }
            if let Some((plot_id, &area)) = areas
                .iter()
                .enumerate()
                .find(|(_, a)| !a.is_finite() || **a <= 0.0)
            {
                return Err(InputError::NonPositiveArea { plot_id, area });
            }
        }
        None => {
            let (min_area, max_area) = (settings.min_area, settings.max_area);
            if !min_area.is_finite()
                || !max_area.is_finite()
                || min_area <= 0.0
                || min_area > max_area
                || min_area.fract() != 0.0
                || max_area.fract() != 0.0
            {
                return Err(InputError::InvalidAreaBounds { min_area, max_area });
            }
        }
    }
    ConstraintRanges::from_settings(settings)
}

/// Ties each search gene to the grid cell it decides, in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneMap {
    cell_of_gene: Vec<usize>,
    gene_of_cell: Vec<Option<usize>>,
}

impl GeneMap {
    pub fn new(grid: &Grid) -> Self {
        let mut cell_of_gene = Vec::new();
        let mut gene_of_cell = vec![None; grid.cells.len()];
        for (idx, cell) in grid.cells.iter().enumerate() {
            if cell.zone != Zone::Road {
                gene_of_cell[idx] = Some(cell_of_gene.len());
                cell_of_gene.push(idx);
            }
        }
        Self {
            cell_of_gene,
            gene_of_cell,
        }
    }

    pub fn len(&self) -> usize {
        self.cell_of_gene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_of_gene.is_empty()
    }

    pub fn cell_index(&self, gene: usize) -> Option<usize> {
        self.cell_of_gene.get(gene).copied()
    }

    pub fn gene_index(&self, cell: usize) -> Option<usize> {
        self.gene_of_cell.get(cell).copied().flatten()
    }

    pub fn cell_indices(&self) -> &[usize] {
        &self.cell_of_gene
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Grid {
    grid_size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn generate_instance(seed: &[u8; 32], settings: &ZoningSettings) -> Result<Self> {
        let mut rng = SmallRng::from_seed(*seed);
        Self::generate(settings, &mut rng)
    }

    /// Lays out `grid_size²` cells row by row and marks the road network.
    pub fn generate<R: Rng>(settings: &ZoningSettings, rng: &mut R) -> Result<Self> {
        validate_settings(settings)?;
        let grid_size = settings.grid_size;
        let num_plots = grid_size * grid_size;
        let manual_areas = settings.manual_areas();

        let mut cells = Vec::with_capacity(num_plots);
        for plot_id in 0..num_plots {
            let x = plot_id % grid_size;
            let y = plot_id / grid_size;
            let area = match manual_areas {
                Some(areas) => areas[plot_id],
                None if settings.min_area == settings.max_area => settings.min_area,
                None => rng.gen_range(settings.min_area as u64..=settings.max_area as u64) as f64,
            };
            let zone = if is_road(x, y, grid_size) {
                Zone::Road
            } else {
                Zone::Unassigned
            };
            cells.push(Cell {
                plot_id,
                x,
                y,
                area,
                zone,
                subtype: String::new(),
                reason: String::new(),
            });
        }
        Ok(Self { grid_size, cells })
    }

    /// Rebuilds a grid from table rows. The rows may describe an edited layout,
    /// so the lattice is not required to be complete; plot ids and coordinates
    /// must still be unique.
    pub fn from_records(records: &[PlotRecord]) -> Result<Self, InputError> {
        let mut cells = records
            .iter()
            .map(Cell::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        cells.sort_by_key(|c| c.plot_id);

        let mut seen_ids = HashSet::new();
        let mut seen_coords = HashSet::new();
        for cell in &cells {
            if cell.x >= MAX_GRID_SIZE || cell.y >= MAX_GRID_SIZE {
                return Err(InputError::CoordinateOutOfRange {
                    x: cell.x,
                    y: cell.y,
                    max_grid_size: MAX_GRID_SIZE,
                });
            }
            if !seen_ids.insert(cell.plot_id) {
                return Err(InputError::DuplicatePlot {
                    plot_id: cell.plot_id,
                });
            }
            if !seen_coords.insert((cell.x, cell.y)) {
                return Err(InputError::DuplicateCoordinate {
                    x: cell.x,
                    y: cell.y,
                });
            }
        }
        let grid_size = cells
            .iter()
            .map(|c| c.x.max(c.y) + 1)
            .max()
            .unwrap_or(0);
        Ok(Self { grid_size, cells })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, plot_id: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.plot_id == plot_id)
    }

    pub fn gene_map(&self) -> GeneMap {
        GeneMap::new(self)
    }

    pub fn records(&self) -> Vec<PlotRecord> {
        self.cells.iter().map(Cell::to_record).collect()
    }

    /// Writes a finished candidate into the non-road cells named by `map`.
    pub fn apply_assignment(&mut self, map: &GeneMap, assignment: &[Zone]) -> Result<(), InputError> {
        if assignment.len() != map.len() {
            return Err(InputError::AssignmentLength {
                expected: map.len(),
                actual: assignment.len(),
            });
        }
        if let Some(zone) = assignment.iter().find(|z| !z.is_assignable()) {
            return Err(InputError::UnknownZone(zone.to_string()));
        }
        for (&cell_idx, &zone) in map.cell_indices().iter().zip(assignment) {
            self.cells[cell_idx].zone = zone;
        }
        Ok(())
    }

    /// Manual edit of a single plot. The reason text is left as it was.
    pub fn override_plot(
        &mut self,
        plot_id: usize,
        zone: Zone,
        subtype: &str,
    ) -> Result<(), InputError> {
        let cell = self
            .cells
            .iter_mut()
            .find(|c| c.plot_id == plot_id)
            .ok_or(InputError::UnknownPlot { plot_id })?;
        cell.zone = zone;
        cell.subtype = subtype.to_string();
        Ok(())
    }
}
