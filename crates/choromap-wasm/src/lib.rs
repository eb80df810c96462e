//! choromap-wasm — WebAssembly bindings for choromap-core
//!
//! The host page fetches the two datasets (county topology and education
//! records) and hands the raw JSON to [`ChoroplethMap::new`]. The returned
//! object renders the SVG and turns pointer events into tooltip state.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { ChoroplethMap } from 'choromap-wasm';
//!
//! async function main() {
//!   await init();
//!   const [counties, education] = await Promise.all([
//!     fetch(COUNTIES_URL).then((r) => r.text()),
//!     fetch(EDUCATION_URL).then((r) => r.text()),
//!   ]);
//!   const map = new ChoroplethMap(counties, education);
//!   document.querySelector('.vis-container').innerHTML = map.render_svg();
//!
//!   document.querySelectorAll('.county').forEach((el) => {
//!     el.addEventListener('mouseover', (e) => show(map.on_enter(+el.dataset.fips, e.pageX, e.pageY)));
//!     el.addEventListener('mouseout', () => show(map.on_leave()));
//!   });
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Tooltip state is returned as a plain object
//!   `{ opacity, content, left, top, education }`; the page decides how to
//!   display it.
//! - Counties without education data are drawn as 0% and listed by
//!   `unmatched_ids()`; each one is also logged to the console.
use choromap_core::{
    ChoroplethMap as CoreMap, ColorScale, Fips, HoverEvent, MapConfig, TooltipState,
};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("Initializing choromap WASM module...");
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/* --------------------------------------------------------------------------
   Map
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct ChoroplethMap {
    inner: CoreMap,
    tooltip: TooltipState,
}

#[wasm_bindgen]
impl ChoroplethMap {
    /// Parses both payloads and joins them.
    #[wasm_bindgen(constructor)]
    pub fn new(counties_json: &str, education_json: &str) -> Result<ChoroplethMap, JsError> {
        let inner = CoreMap::from_json(counties_json, education_json, MapConfig::default())
            .map_err(|e| JsError::new(&e.to_string()))?;

        for id in inner.unmatched() {
            warn(&format!("could not find data for: {id}"));
        }
        log(&format!("✓ Joined {} counties", inner.regions().len()));

        Ok(ChoroplethMap {
            inner,
            tooltip: TooltipState::hidden(),
        })
    }

    /// SVG markup with the tooltip in its current state.
    pub fn render_svg(&self) -> String {
        self.inner.render_svg(&self.tooltip)
    }

    pub fn region_count(&self) -> usize {
        self.inner.regions().len()
    }

    pub fn unmatched_ids(&self) -> Vec<u32> {
        self.inner.unmatched().iter().map(|f| f.0).collect()
    }

    /* ----------------------------------------------------------------------
       Hover
    ---------------------------------------------------------------------- */

    pub fn on_enter(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        self.hover(HoverEvent::Enter { id: Fips(id), x, y });
        self.tooltip()
    }

    pub fn on_leave(&mut self) -> JsValue {
        self.hover(HoverEvent::Leave);
        self.tooltip()
    }

    pub fn tooltip(&self) -> JsValue {
        to_value(&self.tooltip).unwrap_or(JsValue::NULL)
    }

    /* ----------------------------------------------------------------------
       Inspection
    ---------------------------------------------------------------------- */

    pub fn stats(&self) -> JsValue {
        to_value(&self.inner.stats()).unwrap_or(JsValue::NULL)
    }

    pub fn legend(&self) -> JsValue {
        to_value(&self.inner.legend()).unwrap_or(JsValue::NULL)
    }
}

impl ChoroplethMap {
    /// Applies `event` and returns the new tooltip state, for Rust callers.
    pub fn hover(&mut self, event: HoverEvent) -> &TooltipState {
        self.tooltip = self.inner.hover(&self.tooltip, event);
        &self.tooltip
    }
}

/* --------------------------------------------------------------------------
   Scale
-------------------------------------------------------------------------- */

/// Fill color of the education scale for a percentage.
#[wasm_bindgen]
pub fn color_for(value: f64) -> String {
    ColorScale::education().color(value).to_string()
}
