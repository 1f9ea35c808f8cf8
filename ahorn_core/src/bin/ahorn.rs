use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ahorn_core::config::SiteConfig;
use ahorn_core::core::domain::Shape;
use ahorn_core::io::{Catalog, CatalogLoader};
use ahorn_core::preprocessing::DatasheetLinter;
use ahorn_core::services::{
    network_view_tabs, BoxPlotView, DatasetTable, NetworkPanel, TableRows, TemporalChart,
};
use ahorn_core::utils::{format_number, resolve_attachment};

/// Command line front end of the AHORN dataset catalogue
#[derive(Parser, Debug)]
#[command(name = "ahorn")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to the site configuration (defaults to ./ahorn.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file or datasheet directory, overriding the configuration
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the dataset table for a query string
    Table {
        /// Query string as found in the page URL, e.g. `tags=social&sort=numNodes`
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Check datasheet front-matter
    Lint,
    /// Print the datasets.json index
    Index,
    /// Print the five-number summary of a dataset statistic
    Stats {
        slug: String,
        /// Statistics key, e.g. `nodeDegrees`
        key: String,
    },
    /// Print a dataset page
    Show { slug: String },
}

fn main() -> Result<ExitCode> {
    let _ = tracing_subscriber::fmt::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .try_init();

    let cli = Cli::parse();
    let config = SiteConfig::load(cli.config.as_deref())?;
    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog.path.clone());

    match cli.command {
        Commands::Table { query } => {
            let catalog = Catalog::load(&catalog_path)?;
            let table = DatasetTable::from_url(catalog.summaries().to_vec(), &query, String::new());
            let selector = table.range_selector(config.table.min_gap);
            println!(
                "Nodes: {} to {} (of {} to {})",
                format_number(selector.value().min as f64),
                format_number(selector.value().max as f64),
                format_number(selector.domain().min as f64),
                format_number(selector.domain().max as f64)
            );
            match table.rows() {
                TableRows::Rows(rows) => {
                    for row in rows {
                        let tags: Vec<&str> = row.tags.iter().map(String::as_str).collect();
                        println!(
                            "{}\t{}\t{}\t{}",
                            row.slug,
                            row.title,
                            format_number(row.num_nodes as f64),
                            tags.join(", ")
                        );
                    }
                }
                TableRows::NoResults => println!("{}", ahorn_core::services::NO_RESULTS_MESSAGE),
            }
            println!("?{}", table.query_string());
        }
        Commands::Lint => {
            let loaded = CatalogLoader::load_from_path(&catalog_path)?;
            let report = DatasheetLinter::lint_all(loaded.iter());
            if !report.is_clean() {
                eprint!("{}", report.render());
                return Ok(ExitCode::FAILURE);
            }
            println!("Checked {} datasheet(s), no issues found.", report.documents());
        }
        Commands::Index => {
            let catalog = Catalog::load(&catalog_path)?;
            let index = catalog.index_document(Utc::now());
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
        Commands::Stats { slug, key } => {
            let catalog = Catalog::load(&catalog_path)?;
            let record = catalog.require(&slug)?;
            let view = BoxPlotView::from_stat(&key, Some(&key), record.statistics.get(&key));
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Show { slug } => {
            let catalog = Catalog::load(&catalog_path)?;
            let record = catalog.require(&slug)?;

            println!("{}", record.title());
            if !record.summary.tags.is_empty() {
                let tags: Vec<&str> = record.summary.tags.iter().map(String::as_str).collect();
                println!("Tags: {}", tags.join(", "));
            }
            for related in catalog.related(&slug) {
                println!("Related: {} ({})", related.title, related.slug);
            }
            for (key, attachment) in &record.attachments {
                let resolved = resolve_attachment(&config.catalog.base_url, key, attachment)
                    .with_context(|| format!("Failed to resolve attachments of '{}'", slug))?;
                println!(
                    "{}: {} [{}] {}",
                    resolved.label, resolved.file_name, resolved.size, resolved.href
                );
            }

            let tabs = network_view_tabs(record)?;
            for (index, label) in tabs.labels().enumerate() {
                match tabs.panel(index) {
                    Some(NetworkPanel::Graph(graph)) => println!(
                        "{}: {} nodes, {} edges",
                        label,
                        format_number(graph.num_nodes as f64),
                        format_number(graph.num_edges as f64)
                    ),
                    Some(NetworkPanel::SimplicialComplex(simplicial)) => println!(
                        "{}: {} simplices up to dimension {}",
                        label,
                        format_number(simplicial.total_simplices),
                        simplicial.max_dimension
                    ),
                    None => {}
                }
            }

            if let Some(Shape::Temporal(shape)) = &record.shape {
                let chart = TemporalChart::new(shape.clone(), config.unit_range()?);
                let series = chart.stacked_series();
                let units: Vec<&str> = chart.selectable_units().iter().map(|u| u.as_str()).collect();
                println!(
                    "Shape over time: {} {} bucket(s), {} rank(s) (units: {})",
                    series.labels.len(),
                    series.unit,
                    series.ranks.len(),
                    units.join(", ")
                );
                let skipped = chart.skipped_stamps();
                if skipped > 0 {
                    println!("Skipped {} unparseable date stamp(s)", skipped);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
