use super::{Cell, Grid, Zone, APARTMENT, HOSPITAL, MALL, PARK};
use log::debug;
use logging_timer::time;
use ub_structs::core::LayoutReport;

pub const PARK_RADIUS: f64 = 3.0;
pub const PARK_COVERAGE: f64 = 0.6;
pub const MIN_RESIDENTIAL_SHARE: f64 = 30.0;
pub const MIN_GREEN_SHARE: f64 = 10.0;
pub const CHECK_PENALTY: f64 = 10.0;

/// Heuristic quality check of a finished (possibly hand-edited) layout.
///
/// The grid size is taken as the largest X coordinate plus one, which is only
/// right while the layout still spans its full width. Use
/// [`evaluate_layout_with_size`] when the size is known.
#[time]
pub fn evaluate_layout(grid: &Grid) -> LayoutReport {
    let grid_size = grid.cells().iter().map(|c| c.x + 1).max().unwrap_or(0);
    evaluate_layout_with_size(grid, grid_size)
}

pub fn evaluate_layout_with_size(grid: &Grid, grid_size: usize) -> LayoutReport {
    let cells = grid.cells();
    let mut report = LayoutReport {
        score: 100.0,
        justifications: Vec::new(),
        suggestions: Vec::new(),
    };

    check_mall_visibility(cells, &mut report);
    check_hospital_centrality(cells, grid_size, &mut report);
    check_park_proximity(cells, &mut report);
    check_zone_balance(cells, &mut report);

    report.score = report.score.clamp(0.0, 100.0);
    debug!(
        "layout score {} ({} justifications, {} suggestions)",
        report.score,
        report.justifications.len(),
        report.suggestions.len()
    );
    report
}

fn with_subtype<'a>(cells: &'a [Cell], subtype: &'a str) -> impl Iterator<Item = &'a Cell> {
    cells.iter().filter(move |c| c.subtype == subtype)
}

fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).hypot(ay - by)
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn check_mall_visibility(cells: &[Cell], report: &mut LayoutReport) {
    let max_y = cells.iter().map(|c| c.y).max().unwrap_or(0);
    if with_subtype(cells, MALL).any(|c| c.y < max_y / 3) {
        report
            .justifications
            .push("✅ Malls placed near road → good visibility".to_string());
    } else {
        report
            .suggestions
            .push("⚠️ Move malls near road edges".to_string());
    }
}

// Current annotation rules never produce hospitals; they only appear through
// manual edits.
fn check_hospital_centrality(cells: &[Cell], grid_size: usize, report: &mut LayoutReport) {
    let hospitals: Vec<&Cell> = with_subtype(cells, HOSPITAL).collect();
    if hospitals.is_empty() {
        return;
    }
    let center_x = median(cells.iter().map(|c| c.x as f64).collect());
    let center_y = median(cells.iter().map(|c| c.y as f64).collect());
    let avg_dist = hospitals
        .iter()
        .map(|h| distance(h.x as f64, h.y as f64, center_x, center_y))
        .sum::<f64>()
        / hospitals.len() as f64;
    if avg_dist > grid_size as f64 / 3.0 {
        report
            .suggestions
            .push("⚠️ Place hospital closer to center".to_string());
    } else {
        report
            .justifications
            .push("✅ Hospital is centrally located".to_string());
    }
}

fn check_park_proximity(cells: &[Cell], report: &mut LayoutReport) {
    let parks: Vec<&Cell> = with_subtype(cells, PARK).collect();
    let apartments: Vec<&Cell> = with_subtype(cells, APARTMENT).collect();
    if parks.is_empty() || apartments.is_empty() {
        return;
    }
    let close_count = apartments
        .iter()
        .filter(|apt| {
            parks.iter().any(|park| {
                distance(apt.x as f64, apt.y as f64, park.x as f64, park.y as f64) < PARK_RADIUS
            })
        })
        .count();
    if close_count as f64 > apartments.len() as f64 * PARK_COVERAGE {
        report
            .justifications
            .push("✅ Parks accessible from most apartments".to_string());
    } else {
        report
            .suggestions
            .push("⚠️ Improve park proximity to housing".to_string());
        report.score -= CHECK_PENALTY;
    }
}

/// Shares here are by cell count over the whole grid, roads included.
fn check_zone_balance(cells: &[Cell], report: &mut LayoutReport) {
    let share = |zone: Zone| {
        if cells.is_empty() {
            0.0
        } else {
            cells.iter().filter(|c| c.zone == zone).count() as f64 / cells.len() as f64 * 100.0
        }
    };
    if share(Zone::Residential) < MIN_RESIDENTIAL_SHARE {
        report
            .suggestions
            .push("⚠️ Residential area too small".to_string());
        report.score -= CHECK_PENALTY;
    }
    if share(Zone::Green) < MIN_GREEN_SHARE {
        report
            .suggestions
            .push("⚠️ Green space under-represented".to_string());
        report.score -= CHECK_PENALTY;
    }
}
