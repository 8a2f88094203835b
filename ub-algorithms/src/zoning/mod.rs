mod genetic;
mod individual;

pub use genetic::{validate_params, GenerationStats, Genetic};
pub use individual::{two_point_crossover, Individual};

use anyhow::Result;
use log::info;
use logging_timer::time;
use rand::{rngs::SmallRng, SeedableRng};
use ub_challenges::zoning::{validate_settings, Grid, LayoutMap, ZoneFitness};
use ub_structs::config::ZoningSettings;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Finished grid: every non-road cell zoned and annotated.
    pub grid: Grid,
    pub best_fitness: f64,
    pub history: Vec<GenerationStats>,
}

/// Builds the grid, evolves zone assignments for its non-road cells and
/// writes the best one back.
///
/// One random stream seeded from `seed` drives both the area draw and the
/// search, so equal seeds and settings give equal layouts.
#[time]
pub fn search_zoning(settings: &ZoningSettings, seed: &[u8; 32]) -> Result<SearchOutcome> {
    let ranges = validate_settings(settings)?;
    let params = settings.search_params();
    validate_params(&params)?;

    let mut rng = SmallRng::from_seed(*seed);
    let mut grid = Grid::generate(settings, &mut rng)?;
    let map = grid.gene_map();
    let fitness = ZoneFitness::new(&grid, &map, ranges);
    info!(
        "searching {}x{} grid: {} assignable cells, population {}, {} generations",
        settings.grid_size,
        settings.grid_size,
        map.len(),
        params.population_size,
        params.num_generations
    );

    let mut genetic = Genetic::new(&fitness, params, &mut rng)?;
    let best = genetic.run(&mut rng);
    info!("best fitness {:.3}", best.fitness);

    grid.apply_assignment(&map, &best.zones)?;
    grid.annotate();
    Ok(SearchOutcome {
        grid,
        best_fitness: best.fitness,
        history: genetic.history,
    })
}

pub fn run_zoning_ga(settings: &ZoningSettings, seed: &[u8; 32]) -> Result<(Grid, LayoutMap)> {
    let outcome = search_zoning(settings, seed)?;
    let layout = LayoutMap::from_grid(&outcome.grid);
    Ok((outcome.grid, layout))
}
