//! choromap — render the U.S. county education choropleth
//!
//! This binary loads the county topology and the per-county education
//! records, joins them on the FIPS code and writes the resulting map.
//!
//! Usage examples
//! --------------
//!
//! - Render the map from the published datasets to a file
//!   $ choromap render -o map.svg
//!
//! - Render a standalone HTML page from local copies
//!   $ choromap --counties counties.json --education education.json.gz render --html -o map.html
//!
//! - Show join statistics (matched / unmatched counties, bucket histogram)
//!   $ choromap stats
//!
//! - Show what the tooltip says for one county
//!   $ choromap lookup 1001
//!
//! Logging
//! -------
//!
//! Diagnostics (including counties without education data) go to stderr.
//! Set `RUST_LOG=debug` for more detail, `RUST_LOG=error` to silence them.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use choromap_core::tooltip::tooltip_text;
use choromap_core::{ChoroplethMap, Fips, Loader, MapConfig, TooltipState};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut loader = Loader::new();
    if let Some(secs) = args.timeout_secs {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }

    // Load both datasets; either failure aborts before anything is drawn.
    let datasets = loader
        .load(&args.counties, &args.education)
        .context("failed to load datasets")?;
    let map = ChoroplethMap::build(datasets, MapConfig::default())?;

    match args.command {
        Commands::Render {
            output,
            html,
            title,
        } => {
            let body = if html {
                map.render_html(&title)
            } else {
                map.render_svg(&TooltipState::hidden())
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, body)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "map written");
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(body.as_bytes())?;
                    stdout.flush()?;
                }
            }
        }

        Commands::Stats => {
            let stats = map.stats();
            println!("Join statistics:");
            println!("  Regions: {}", stats.regions);
            println!("  Records: {}", stats.records);
            println!("  Matched: {}", stats.matched);
            println!("  Unmatched: {}", stats.unmatched);
            println!("Color buckets:");
            let legend = map.legend();
            for (segment, count) in legend.segments.iter().zip(&stats.buckets) {
                println!(
                    "  {} [{:>5.2}%, {:>5.2}%): {}",
                    segment.color, segment.lo, segment.hi, count
                );
            }
        }

        Commands::Lookup { fips } => {
            let id: u32 = fips
                .trim()
                .parse()
                .with_context(|| format!("`{fips}` is not a numeric FIPS code"))?;
            let id = Fips(id);
            match map.region(id) {
                Some(joined) => {
                    println!("FIPS: {id}");
                    println!("Tooltip: {}", tooltip_text(map.record_for(id)));
                    println!("Education: {}", joined.education);
                    println!("Fill: {}", joined.fill);
                }
                None => eprintln!("No county with FIPS {id} in the topology"),
            }
        }
    }

    Ok(())
}
