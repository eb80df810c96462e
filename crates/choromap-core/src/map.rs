// crates/choromap-core/src/map.rs
use crate::common::JoinStats;
use crate::config::MapConfig;
use crate::error::Result;
use crate::join::{join_regions, JoinedRegion};
use crate::legend::Legend;
use crate::loader::Datasets;
use crate::model::{EducationRecord, Fips, Geometry, Region};
use crate::render;
use crate::scale::{ColorScale, LinearScale};
use crate::tooltip::{self, HoverEvent, TooltipState};
use crate::topology::Topology;
use crate::traits::RecordLookup;
use svg::Document;
use tracing::info;

/// The joined, ready-to-draw map.
///
/// Built once from the two datasets; every accessor and renderer works on
/// this immutable value.
#[derive(Debug, Clone)]
pub struct ChoroplethMap {
    config: MapConfig,
    colors: ColorScale,
    key: LinearScale,
    regions: Vec<Region>,
    records: Vec<EducationRecord>,
    joined: Vec<JoinedRegion>,
    unmatched: Vec<Fips>,
    borders: Geometry,
}

impl ChoroplethMap {
    /// Decodes counties and state borders, then joins them with the records.
    pub fn build(datasets: Datasets, config: MapConfig) -> Result<Self> {
        let Datasets {
            topology,
            education,
        } = datasets;
        Self::from_parts(&topology, education, config)
    }

    /// Same as [`ChoroplethMap::build`] for payloads already held in memory.
    pub fn from_json(counties: &str, education: &str, config: MapConfig) -> Result<Self> {
        let topology = Topology::from_json_str(counties)?;
        let records: Vec<EducationRecord> = serde_json::from_str(education)?;
        Self::from_parts(&topology, records, config)
    }

    fn from_parts(
        topology: &Topology,
        records: Vec<EducationRecord>,
        config: MapConfig,
    ) -> Result<Self> {
        let colors = config.color_scale()?;
        let key = config.key_scale();

        let regions = topology.regions(&config.counties_object)?;
        let borders = topology.interior_mesh(&config.states_object)?;

        let outcome = join_regions(&regions, records.as_slice(), &colors);
        info!(
            regions = regions.len(),
            records = records.len(),
            unmatched = outcome.unmatched.len(),
            "joined counties with education data"
        );

        Ok(Self {
            config,
            colors,
            key,
            regions,
            records,
            joined: outcome.regions,
            unmatched: outcome.unmatched,
            borders,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.colors
    }

    pub fn key_scale(&self) -> &LinearScale {
        &self.key
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn records(&self) -> &[EducationRecord] {
        &self.records
    }

    pub fn joined(&self) -> &[JoinedRegion] {
        &self.joined
    }

    /// Region ids that had no education record.
    pub fn unmatched(&self) -> &[Fips] {
        &self.unmatched
    }

    /// Borders between different states.
    pub fn borders(&self) -> &Geometry {
        &self.borders
    }

    pub fn region(&self, id: Fips) -> Option<&JoinedRegion> {
        self.joined.iter().find(|j| j.id == id)
    }

    pub fn record_for(&self, id: Fips) -> Option<&EducationRecord> {
        self.records.find_record(id)
    }

    pub fn legend(&self) -> Legend {
        Legend::build(&self.colors, &self.key)
    }

    pub fn stats(&self) -> JoinStats {
        let mut buckets = vec![0; self.colors.colors().len()];
        for j in &self.joined {
            buckets[j.bucket] += 1;
        }
        JoinStats {
            regions: self.joined.len(),
            records: self.records.len(),
            matched: self.joined.len() - self.unmatched.len(),
            unmatched: self.unmatched.len(),
            buckets,
        }
    }

    /// Applies a hover event to `state`.
    pub fn hover(&self, state: &TooltipState, event: HoverEvent) -> TooltipState {
        tooltip::reduce(state, event, self.records.as_slice(), self.config.tooltip_style())
    }

    pub fn render(&self, tooltip: &TooltipState) -> Document {
        render::render_document(self, tooltip)
    }

    pub fn render_svg(&self, tooltip: &TooltipState) -> String {
        self.render(tooltip).to_string()
    }

    pub fn render_html(&self, title: &str) -> String {
        render::render_html(&self.render_svg(&TooltipState::hidden()), title)
    }
}
