use super::{Cell, Grid, Zone, APARTMENT, HOSPITAL, INDEPENDENT_HOUSE, LOCAL_SHOP, MALL, PARK};
use std::fmt;

/// Text rendering of a layout, one glyph per cell, row `y = 0` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMap {
    rows: Vec<String>,
}

/// Subtype wins over zone so hand-edited plots stay visible.
pub fn cell_to_char(cell: &Cell) -> char {
    match (cell.zone, cell.subtype.as_str()) {
        (Zone::Road, _) => '#',
        (Zone::Unassigned, _) => '.',
        (_, APARTMENT) => 'A',
        (_, INDEPENDENT_HOUSE) => 'H',
        (_, MALL) => 'M',
        (_, LOCAL_SHOP) => 'S',
        (_, PARK) => 'P',
        (_, HOSPITAL) => '+',
        (Zone::Residential, _) => 'R',
        (Zone::Commercial, _) => 'C',
        (Zone::Green, _) => 'G',
    }
}

impl LayoutMap {
    pub fn from_grid(grid: &Grid) -> Self {
        let size = grid.grid_size();
        let mut canvas = vec![vec![' '; size]; size];
        for cell in grid.cells() {
            if cell.x < size && cell.y < size {
                canvas[cell.y][cell.x] = cell_to_char(cell);
            }
        }
        Self {
            rows: canvas.into_iter().map(|row| row.into_iter().collect()).collect(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn legend() -> &'static str {
        "# road  A apartment  H house  M mall  S shop  P park  + hospital  . unassigned"
    }
}

impl fmt::Display for LayoutMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
