use anyhow::{anyhow, Result};
use std::{fs, io::Read};
use ub_algorithms::search_zoning;
use ub_challenges::zoning::{
    evaluate_layout, evaluate_layout_with_size, zoning_summary, Grid, LayoutMap, Zone,
};
use ub_structs::{
    config::ZoningSettings,
    core::{LayoutReport, OutputData, ZoneShare},
};
use ub_utils::{jsonify_pretty, seed_fingerprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Map,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "map" => Ok(OutputFormat::Map),
            other => Err(anyhow!("Unknown output format '{}'", other)),
        }
    }
}

/// Runs the search for `settings` and packs grid, score and summary together.
pub fn compute_layout(settings: &ZoningSettings, seed_str: &str) -> Result<OutputData> {
    let seed = settings.calc_seed(seed_str);
    tracing::info!(
        "computing layout with seed '{}' ({})",
        seed_str,
        seed_fingerprint(&seed)
    );
    let outcome = search_zoning(settings, &seed)?;
    Ok(OutputData {
        seed: seed_str.to_string(),
        fitness: outcome.best_fitness,
        plots: outcome.grid.records(),
        report: evaluate_layout_with_size(&outcome.grid, settings.grid_size),
        summary: zoning_summary(&outcome.grid),
    })
}

pub fn format_output(output: &OutputData, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => jsonify_pretty(output),
        OutputFormat::Csv => ub_challenges::zoning::write_plot_table(&output.plots),
        OutputFormat::Map => LayoutMap::from_grid(&Grid::from_records(&output.plots)?).to_string(),
    })
}

pub fn evaluate_table(table: &str, grid_size: Option<usize>) -> Result<LayoutReport> {
    let grid = Grid::from_table(table)?;
    Ok(match grid_size {
        Some(grid_size) => evaluate_layout_with_size(&grid, grid_size),
        None => evaluate_layout(&grid),
    })
}

pub fn summarize_table(table: &str) -> Result<Vec<ZoneShare>> {
    Ok(zoning_summary(&Grid::from_table(table)?))
}

/// Applies a manual override; without a new subtype the current one is kept.
pub fn edit_table(table: &str, plot_id: usize, zone: &str, subtype: Option<&str>) -> Result<String> {
    let mut grid = Grid::from_table(table)?;
    let zone: Zone = zone.parse()?;
    let subtype = match subtype {
        Some(subtype) => subtype.to_string(),
        None => grid
            .cell(plot_id)
            .map(|c| c.subtype.clone())
            .unwrap_or_default(),
    };
    grid.override_plot(plot_id, zone, &subtype)?;
    Ok(grid.to_table())
}

pub fn render_table(table: &str) -> Result<String> {
    Ok(LayoutMap::from_grid(&Grid::from_table(table)?).to_string())
}

/// Reads a table from a file path, or from stdin when given `-`.
pub fn read_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        fs::read_to_string(arg).map_err(|e| anyhow!("Failed to read file {}: {}", arg, e))
    }
}
