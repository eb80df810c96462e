// crates/choromap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Fetches the county topology and the education records, from HTTP or from
//! disk, and hands both over as one [`Datasets`] value. The two reads run
//! concurrently (feature `parallel`); nothing is returned unless both succeed.

use crate::error::{MapError, Result};
use crate::model::EducationRecord;
use crate::topology::Topology;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

mod common_io;
mod source;

pub use source::Source;

pub const COUNTIES_URL: &str = "https://raw.githubusercontent.com/no-stack-dub-sack/testable-projects-fcc/master/src/data/choropleth_map/counties.json";
pub const EDUCATION_URL: &str = "https://raw.githubusercontent.com/no-stack-dub-sack/testable-projects-fcc/master/src/data/choropleth_map/for_user_education.json";

#[cfg(feature = "fetch")]
type Client = reqwest::blocking::Client;
#[cfg(not(feature = "fetch"))]
type Client = ();

/// Both inputs of the map, fully parsed.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub topology: Topology,
    pub education: Vec<EducationRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct Loader {
    timeout: Option<Duration>,
}

impl Loader {
    /// Loader without a request timeout: a stalled server stalls the load.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_sources() -> (Source, Source) {
        (
            Source::Url(COUNTIES_URL.to_string()),
            Source::Url(EDUCATION_URL.to_string()),
        )
    }

    pub fn load_default(&self) -> Result<Datasets> {
        let (counties, education) = Self::default_sources();
        self.load(&counties, &education)
    }

    /// Reads both sources and waits for both.
    ///
    /// If either read fails the error is returned and the other result is
    /// dropped; when both fail, the counties error is reported.
    pub fn load(&self, counties: &Source, education: &Source) -> Result<Datasets> {
        info!(%counties, %education, "loading datasets");
        let client = self.client_for(&[counties, education])?;
        let client = client.as_ref();

        let (topology, records) = both(
            || read_json::<Topology>(client, counties),
            || read_json::<Vec<EducationRecord>>(client, education),
        );
        let topology = topology?;
        let education = records?;

        info!(
            objects = topology.objects.len(),
            arcs = topology.arcs.len(),
            records = education.len(),
            "datasets loaded"
        );
        Ok(Datasets {
            topology,
            education,
        })
    }

    #[cfg(feature = "fetch")]
    fn client_for(&self, sources: &[&Source]) -> Result<Option<Client>> {
        if !sources.iter().any(|s| s.is_remote()) {
            return Ok(None);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("choromap/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()?;
        Ok(Some(client))
    }

    #[cfg(not(feature = "fetch"))]
    fn client_for(&self, _sources: &[&Source]) -> Result<Option<Client>> {
        Ok(None)
    }
}

fn read_json<T: DeserializeOwned>(client: Option<&Client>, source: &Source) -> Result<T> {
    match source {
        Source::Path(path) => {
            debug!(path = %path.display(), "reading local dataset");
            let reader = common_io::open_stream(path)?;
            Ok(serde_json::from_reader(reader)?)
        }
        #[cfg(feature = "fetch")]
        Source::Url(url) => {
            let client = client.ok_or_else(|| {
                MapError::InvalidSource(format!("no HTTP client available for {url}"))
            })?;
            debug!(url = %url, "fetching dataset");
            let body = common_io::fetch_bytes(client, url)?;
            Ok(serde_json::from_slice(&body)?)
        }
        #[cfg(not(feature = "fetch"))]
        Source::Url(url) => {
            let _ = client;
            Err(MapError::InvalidSource(format!(
                "{url}: HTTP sources need the 'fetch' feature"
            )))
        }
    }
}

#[cfg(feature = "parallel")]
fn both<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn both<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}
