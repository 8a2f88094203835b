use super::{ConstraintRanges, GeneMap, Grid, Zone};

pub const BASE_FITNESS: f64 = 100.0;

/// Scores candidate assignments against the target bands.
///
/// Borrows the base grid immutably and only keeps the per-gene areas, so
/// concurrent evaluations never see each other's candidates.
#[derive(Debug, Clone)]
pub struct ZoneFitness {
    gene_areas: Vec<f64>,
    total_area: f64,
    ranges: ConstraintRanges,
}

impl ZoneFitness {
    pub fn new(grid: &Grid, map: &GeneMap, ranges: ConstraintRanges) -> Self {
        let gene_areas: Vec<f64> = map
            .cell_indices()
            .iter()
            .map(|&idx| grid.cells()[idx].area)
            .collect();
        let total_area = gene_areas.iter().sum();
        Self {
            gene_areas,
            total_area,
            ranges,
        }
    }

    pub fn num_genes(&self) -> usize {
        self.gene_areas.len()
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    pub fn ranges(&self) -> &ConstraintRanges {
        &self.ranges
    }

    /// Area-weighted share of Residential, Commercial and Green, in percent.
    pub fn zone_percentages(&self, assignment: &[Zone]) -> [f64; 3] {
        let mut area_by_zone = [0.0; 3];
        for (zone, area) in assignment.iter().zip(&self.gene_areas) {
            if let Some(i) = Zone::ASSIGNABLE.iter().position(|z| z == zone) {
                area_by_zone[i] += area;
            }
        }
        percentages(area_by_zone, self.total_area)
    }

    pub fn evaluate(&self, assignment: &[Zone]) -> f64 {
        score_percentages(&self.zone_percentages(assignment), &self.ranges)
    }
}

fn percentages(area_by_zone: [f64; 3], total_area: f64) -> [f64; 3] {
    if total_area <= 0.0 {
        return [0.0; 3];
    }
    area_by_zone.map(|area| area / total_area * 100.0)
}

/// Starts from 100 and subtracts how far each zone falls outside its band.
pub fn score_percentages(percentages: &[f64; 3], ranges: &ConstraintRanges) -> f64 {
    let mut score = BASE_FITNESS;
    for (zone, &pct) in Zone::ASSIGNABLE.iter().zip(percentages) {
        let (min, max) = ranges.for_zone(*zone);
        if pct < min {
            score -= min - pct;
        }
        if pct > max {
            score -= pct - max;
        }
    }
    score
}

/// Fitness of the zones currently written into a grid's non-road cells.
pub fn grid_fitness(grid: &Grid, ranges: &ConstraintRanges) -> f64 {
    let mut area_by_zone = [0.0; 3];
    let mut total_area = 0.0;
    for cell in grid.cells().iter().filter(|c| c.zone != Zone::Road) {
        total_area += cell.area;
        if let Some(i) = Zone::ASSIGNABLE.iter().position(|z| *z == cell.zone) {
            area_by_zone[i] += cell.area;
        }
    }
    score_percentages(&percentages(area_by_zone, total_area), ranges)
}
