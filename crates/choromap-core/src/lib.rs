// crates/choromap-core/src/lib.rs

//! # choromap-core
//!
//! Joins U.S. county boundary topology with per-county education statistics
//! and renders the result as a choropleth SVG: one filled path per county, a
//! threshold-scale legend, a state border overlay and a tooltip element.
//!
//! ```no_run
//! use choromap_core::prelude::*;
//!
//! let datasets = Loader::new().load_default()?;
//! let map = ChoroplethMap::build(datasets, MapConfig::default())?;
//! println!("{}", map.render_svg(&TooltipState::hidden()));
//! # Ok::<(), choromap_core::MapError>(())
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod join;
pub mod legend;
pub mod loader;
pub mod map;
pub mod model;
pub mod render;
pub mod scale;
pub mod tooltip;
pub mod topology;
pub mod traits;

// Re-exports
pub use crate::common::JoinStats;
pub use crate::config::MapConfig;
pub use crate::error::{MapError, Result};
pub use crate::join::{join_regions, JoinedRegion, JoinOutcome};
pub use crate::legend::{Legend, LegendSegment, LegendTick};
pub use crate::loader::{Datasets, Loader, Source};
pub use crate::map::ChoroplethMap;
pub use crate::model::{EducationRecord, Fips, Geometry, Position, Region};
pub use crate::scale::{ColorScale, LinearScale, SCHEME_BLUES_9};
pub use crate::tooltip::{HoverEvent, TooltipState};
pub use crate::topology::Topology;
pub use crate::traits::RecordLookup;

pub mod prelude {
    pub use crate::{
        ChoroplethMap, ColorScale, Datasets, EducationRecord, Fips, HoverEvent, JoinStats,
        Legend, LinearScale, Loader, MapConfig, MapError, RecordLookup, Region, Result, Source,
        TooltipState, Topology,
    };
}
