use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use std::{fs, path::PathBuf};
use tracing::Level;
use ub_challenges::zoning::LayoutMap;
use ub_runtime::*;
use ub_structs::config::ZoningSettings;
use ub_utils::{jsonify_pretty, load_json_arg};

fn cli() -> Command {
    Command::new("ub-runtime")
        .about("Computes, edits and evaluates zoning layouts")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose "Log every generation").action(ArgAction::SetTrue).global(true))
        .subcommand(
            Command::new("run_zoning")
                .about("Searches for a zone assignment and prints the finished layout")
                .arg(
                    arg!(<SETTINGS> "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation (random if omitted)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--format [FORMAT] "Output format")
                        .default_value("json")
                        .value_parser(["json", "csv", "map"]),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the output will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("evaluate_layout")
                .about("Scores a layout table and lists justifications and suggestions")
                .arg(
                    arg!(<TABLE> "Path to a plot table, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--grid_size [GRID_SIZE] "Grid size (derived from the widest row if omitted)")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Area and share of each zone in a layout table")
                .arg(
                    arg!(<TABLE> "Path to a plot table, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("edit_plot")
                .about("Overrides the zone and subtype of one plot")
                .arg(
                    arg!(<TABLE> "Path to a plot table, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<PLOT_ID> "Plot to edit").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(<ZONE> "New zone")
                        .value_parser(["Residential", "Commercial", "Green", "Road"]),
                )
                .arg(
                    arg!(--subtype [SUBTYPE] "New subtype, e.g. Hospital (kept if omitted)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the edited table will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Prints a layout table as a text map")
                .arg(
                    arg!(<TABLE> "Path to a plot table, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = match matches.subcommand() {
        Some(("run_zoning", sub_m)) => run_zoning(
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            sub_m.get_one::<String>("seed").cloned(),
            sub_m.get_one::<String>("format").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("evaluate_layout", sub_m)) => evaluate(
            sub_m.get_one::<String>("TABLE").unwrap().clone(),
            sub_m.get_one::<usize>("grid_size").cloned(),
        ),
        Some(("summary", sub_m)) => summary(sub_m.get_one::<String>("TABLE").unwrap().clone()),
        Some(("edit_plot", sub_m)) => edit_plot(
            sub_m.get_one::<String>("TABLE").unwrap().clone(),
            *sub_m.get_one::<usize>("PLOT_ID").unwrap(),
            sub_m.get_one::<String>("ZONE").unwrap().clone(),
            sub_m.get_one::<String>("subtype").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("render", sub_m)) => render(sub_m.get_one::<String>("TABLE").unwrap().clone()),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn emit(content: &str, output_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        fs::write(&path, content)?;
        println!("output written to: {:?}", path);
    } else {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

pub fn run_zoning(
    settings: String,
    seed: Option<String>,
    format: String,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let settings: ZoningSettings = load_json_arg(&settings)?;
    let seed = seed.unwrap_or_else(|| format!("{:016x}", rand::random::<u64>()));
    let output = compute_layout(&settings, &seed)?;
    tracing::info!(
        "layout ready: fitness {:.2}, score {}, seed '{}'",
        output.fitness,
        output.report.score,
        output.seed
    );
    emit(&format_output(&output, format.parse()?)?, output_file)
}

pub fn evaluate(table: String, grid_size: Option<usize>) -> Result<()> {
    let report = evaluate_table(&read_input(&table)?, grid_size)?;
    emit(&jsonify_pretty(&report), None)
}

pub fn summary(table: String) -> Result<()> {
    let summary = summarize_table(&read_input(&table)?)?;
    emit(&jsonify_pretty(&summary), None)
}

pub fn edit_plot(
    table: String,
    plot_id: usize,
    zone: String,
    subtype: Option<String>,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let edited = edit_table(&read_input(&table)?, plot_id, &zone, subtype.as_deref())?;
    tracing::info!("plot {} set to {}", plot_id, zone);
    emit(&edited, output_file)
}

pub fn render(table: String) -> Result<()> {
    emit(&render_table(&read_input(&table)?)?, None)?;
    println!("{}", LayoutMap::legend());
    Ok(())
}
