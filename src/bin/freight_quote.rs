//! Command-line quoting: one shipment, or a batch file, against a rate table.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::{debug, error};

use freight_cost_optimizer::{
    config::{AppConfig, DATA_SOURCE_ENV, DEFAULT_DATA_SOURCE, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV},
    domain::{
        filter_by_constraint, parse_weight, process_batch, quote, summarize, BatchRow, Constraint,
        Goal, QuoteResult,
    },
    infra::{load_batch_file, write_batch_table, write_charts, write_results_table, RateRepository},
    logging::init_logging,
};

#[derive(Parser, Debug)]
#[command(name = "freight_quote")]
#[command(
    version = option_env!("GIT_TAG").unwrap_or(env!("CARGO_PKG_VERSION")),
    about = "Rank air, sea and rail lanes for a shipment by cost, time or emissions"
)]
struct Cli {
    /// Origin city, matched exactly
    #[arg(required_unless_present = "batch")]
    origin: Option<String>,

    /// Destination city, matched exactly
    #[arg(required_unless_present = "batch")]
    destination: Option<String>,

    /// Weight such as 1000, 1000kg or 2204.62 lbs
    #[arg(required_unless_present = "batch", allow_hyphen_values = true)]
    weight: Option<String>,

    /// Rate table path or http(s) URL
    #[arg(long = "data", value_name = "SOURCE", env = DATA_SOURCE_ENV, default_value = DEFAULT_DATA_SOURCE)]
    data: String,

    /// What to optimise for: cheapest, fastest or greenest
    #[arg(long, default_value = "cheapest")]
    goal: Goal,

    /// Drop lanes costing more than this (USD)
    #[arg(long, value_name = "USD")]
    max_cost: Option<f64>,

    /// Drop lanes slower than this
    #[arg(long, value_name = "DAYS")]
    max_days: Option<f64>,

    /// Directory for the results table and charts
    #[arg(long, value_name = "DIR", env = OUTPUT_DIR_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Skip writing chart files
    #[arg(long)]
    no_charts: bool,

    /// Quote every row of an origin,destination,weight CSV instead
    #[arg(long, value_name = "FILE", conflicts_with_all = ["origin", "destination", "weight"])]
    batch: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            data_source: self.data.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    fn constraint(&self) -> Result<Constraint> {
        let limit = |value: Option<f64>, flag: &str| match value {
            None => Ok(f64::INFINITY),
            Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
            Some(v) => Err(anyhow::anyhow!("{flag} must be a non-negative number, got {v}")),
        };
        Ok(Constraint::new(
            limit(self.max_cost, "--max-cost")?,
            limit(self.max_days, "--max-days")?,
        ))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let constraint = cli.constraint()?;
    debug!(?config, ?constraint, goal = cli.goal.key(), "starting");

    let repository = RateRepository::from_source_str(&config.data_source)
        .with_context(|| format!("invalid data source '{}'", config.data_source))?;
    let snapshot = repository
        .load()
        .await
        .with_context(|| format!("failed to load rates from {}", repository.source()))?;

    if let Some(batch) = &cli.batch {
        let requests = load_batch_file(batch)
            .with_context(|| format!("failed to read batch file {}", batch.display()))?;
        let rows = process_batch(&snapshot.records, &requests, cli.goal, constraint);
        println!("{}", batch_table(&rows));
        let path = write_batch_table(&rows, &config.output_dir).context("failed to save batch results")?;
        println!("Saved {}", path.display());
        return Ok(());
    }

    // clap guarantees these when --batch is absent
    let (Some(origin), Some(destination), Some(weight)) = (&cli.origin, &cli.destination, &cli.weight)
    else {
        anyhow::bail!("origin, destination and weight are required");
    };
    let weight_kg = parse_weight(weight).with_context(|| format!("invalid weight '{weight}'"))?;

    let ranked = quote(&snapshot.records, origin, destination, weight_kg);
    if ranked.is_empty() {
        println!("No available routes from {origin} to {destination}.");
        return Ok(());
    }
    let allowed = filter_by_constraint(&ranked, constraint.max_cost, constraint.max_days);
    let Some(summary) = summarize(&allowed) else {
        println!(
            "No route from {origin} to {destination} satisfies the limits ({} lanes excluded).",
            ranked.len()
        );
        return Ok(());
    };

    println!("{}", results_table(&allowed));
    for goal in Goal::ALL {
        let marker = if goal == cli.goal { "▶" } else { " " };
        println!("{marker} {} {}", goal.emoji(), summary.insight(goal));
    }

    let table = write_results_table(&allowed, &config.output_dir, origin, destination, weight_kg)
        .context("failed to save results table")?;
    println!("Saved {}", table.display());
    if !cli.no_charts {
        for chart in write_charts(&allowed, &config.output_dir).context("failed to save charts")? {
            println!("Saved {}", chart.display());
        }
    }
    Ok(())
}

fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn numeric(text: impl ToString) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn results_table(results: &[QuoteResult]) -> Table {
    let mut table = create_table();
    table.set_header(header(&["#", "Mode", "Total cost (USD)", "Transit (days)", "CO₂ (kg/km)"]));
    for (idx, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(result.mode()),
            numeric(format!("{:.2}", result.total_cost)),
            numeric(result.transit_days()),
            numeric(result.co2_per_km()),
        ]);
    }
    table
}

fn batch_table(rows: &[BatchRow]) -> Table {
    let mut table = create_table();
    table.set_header(header(&["Origin", "Destination", "Weight", "Mode", "Total cost (USD)"]));
    for row in rows {
        let cost = if row.is_routed() {
            numeric(row.cost_label())
        } else {
            Cell::new(row.cost_label()).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&row.request.origin),
            Cell::new(&row.request.destination),
            Cell::new(&row.request.weight_input),
            Cell::new(row.mode_label()),
            cost,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_are_required_without_batch() {
        assert!(Cli::try_parse_from(["freight_quote", "Shanghai"]).is_err());
        let cli = Cli::try_parse_from(["freight_quote", "--batch", "requests.csv"]).unwrap();
        assert!(cli.origin.is_none());
    }

    #[test]
    fn parses_goal_and_limits() {
        let cli = Cli::try_parse_from([
            "freight_quote",
            "Shanghai",
            "Los Angeles",
            "2204.62 lbs",
            "--goal",
            "Fastest",
            "--max-days",
            "10",
            "--data",
            "rates.csv",
        ])
        .unwrap();
        assert_eq!(cli.goal, Goal::Fastest);
        assert_eq!(cli.data, "rates.csv");
        let constraint = cli.constraint().unwrap();
        assert_eq!(constraint.max_days, 10.0);
        assert!(constraint.max_cost.is_infinite());
    }

    #[test]
    fn negative_limits_are_rejected() {
        let cli = Cli::try_parse_from(["freight_quote", "A", "B", "1", "--max-cost=-5"]).unwrap();
        assert!(cli.constraint().is_err());
    }
}
