// crates/choromap-core/src/tooltip.rs

//! Hover handling as data: pointer events go in, a new [`TooltipState`] comes
//! out. Nothing here touches a document; renderers read the state.

use crate::model::{EducationRecord, Fips};
use crate::traits::RecordLookup;
use serde::{Deserialize, Serialize};

/// Pointer input over the county layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoverEvent {
    /// Pointer entered county `id` at page position (`x`, `y`).
    Enter { id: Fips, x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub opacity: f64,
    pub content: String,
    pub left: f64,
    pub top: f64,
    /// Value exposed as `data-education` while shown.
    pub education: Option<f64>,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::hidden()
    }
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            content: String::new(),
            left: 0.0,
            top: 0.0,
            education: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// `"{area_name}, {state}: {pct}%"`, or `"0"` when the county has no record.
pub fn tooltip_text(record: Option<&EducationRecord>) -> String {
    match record {
        Some(r) => format!("{}, {}: {}%", r.area_name, r.state, r.bachelors_or_higher),
        None => "0".to_string(),
    }
}

/// Placement and opacity applied when a tooltip is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    pub offset: (f64, f64),
    pub opacity: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            offset: (10.0, -28.0),
            opacity: 0.9,
        }
    }
}

/// Next tooltip state after `event`.
///
/// Leaving only hides the tooltip; content and position are kept so a fade
/// out has something to show.
pub fn reduce<L>(
    state: &TooltipState,
    event: HoverEvent,
    records: &L,
    style: TooltipStyle,
) -> TooltipState
where
    L: RecordLookup + ?Sized,
{
    match event {
        HoverEvent::Enter { id, x, y } => {
            let record = records.find_record(id);
            TooltipState {
                opacity: style.opacity,
                content: tooltip_text(record),
                left: x + style.offset.0,
                top: y + style.offset.1,
                education: Some(record.map_or(0.0, |r| r.bachelors_or_higher)),
            }
        }
        HoverEvent::Leave => TooltipState {
            opacity: 0.0,
            ..state.clone()
        },
    }
}
