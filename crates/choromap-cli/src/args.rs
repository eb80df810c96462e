use choromap_core::loader::{COUNTIES_URL, EDUCATION_URL};
use choromap_core::Source;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for choromap
#[derive(Debug, Parser)]
#[command(
    name = "choromap",
    version,
    about = "Render a choropleth map of U.S. county educational attainment"
)]
pub struct CliArgs {
    /// County topology: URL or path to a TopoJSON file (`.gz` accepted)
    #[arg(long = "counties", global = true, default_value = COUNTIES_URL)]
    pub counties: Source,

    /// Education records: URL or path to a JSON array (`.gz` accepted)
    #[arg(long = "education", global = true, default_value = EDUCATION_URL)]
    pub education: Source,

    /// Give up on an HTTP request after this many seconds (default: wait forever)
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the map as SVG (or a full HTML page)
    Render {
        /// Output file (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Wrap the SVG in a standalone HTML page
        #[arg(long = "html")]
        html: bool,

        /// Page title used with --html
        #[arg(long = "title", default_value = "United States Educational Attainment")]
        title: String,
    },

    /// Show how well the two datasets joined
    Stats,

    /// Show tooltip text and fill color for one county
    Lookup {
        /// County FIPS code (e.g. 1001 or 01001)
        fips: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_published_urls() {
        let args = CliArgs::parse_from(["choromap", "stats"]);
        assert_eq!(args.counties, Source::Url(COUNTIES_URL.into()));
        assert_eq!(args.education, Source::Url(EDUCATION_URL.into()));
        assert!(args.timeout_secs.is_none());
        assert!(matches!(args.command, Commands::Stats));
    }

    #[test]
    fn global_sources_after_subcommand() {
        let args = CliArgs::parse_from([
            "choromap",
            "render",
            "--html",
            "-o",
            "map.html",
            "--counties",
            "data/counties.json",
        ]);
        assert_eq!(args.counties, Source::Path(PathBuf::from("data/counties.json")));
        match args.command {
            Commands::Render { output, html, .. } => {
                assert!(html);
                assert_eq!(output, Some(PathBuf::from("map.html")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
