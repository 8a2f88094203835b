use super::{Grid, Zone};
use ub_structs::core::ZoneShare;

const SUMMARY_ORDER: [Zone; 4] = [
    Zone::Residential,
    Zone::Commercial,
    Zone::Green,
    Zone::Unassigned,
];

/// Area and share of non-road area per zone present in the grid, rounded to
/// one decimal place.
pub fn zoning_summary(grid: &Grid) -> Vec<ZoneShare> {
    let area_of = |zone: Zone| -> Option<f64> {
        let mut cells = grid.cells().iter().filter(|c| c.zone == zone).peekable();
        cells.peek()?;
        Some(cells.map(|c| c.area).sum())
    };
    let areas: Vec<(Zone, f64)> = SUMMARY_ORDER
        .iter()
        .filter_map(|&zone| area_of(zone).map(|area| (zone, area)))
        .collect();
    let total: f64 = areas.iter().map(|(_, area)| area).sum();

    areas
        .into_iter()
        .map(|(zone, area)| ZoneShare {
            zone: zone.to_string(),
            area,
            percentage: if total > 0.0 {
                (area / total * 1000.0).round() / 10.0
            } else {
                0.0
            },
        })
        .collect()
}
