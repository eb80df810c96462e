use wasm_bindgen_test::*;

use choromap_core::{Fips, HoverEvent};
use choromap_wasm::{color_for, ChoroplethMap};

const COUNTIES: &str = include_str!("../../choromap-core/tests/fixtures/counties.json");
const EDUCATION: &str = include_str!("../../choromap-core/tests/fixtures/education.json");

#[wasm_bindgen_test]
fn builds_map_from_payloads() {
    let map = ChoroplethMap::new(COUNTIES, EDUCATION)
        .unwrap_or_else(|_| panic!("map should build"));
    assert_eq!(map.region_count(), 3);
    assert_eq!(map.unmatched_ids(), vec![2001]);
    assert!(map.render_svg().contains("data-fips=\"1001\""));
}

#[wasm_bindgen_test]
fn hover_updates_tooltip_state() {
    let mut map = ChoroplethMap::new(COUNTIES, EDUCATION)
        .unwrap_or_else(|_| panic!("map should build"));

    let shown = map
        .hover(HoverEvent::Enter { id: Fips(1001), x: 10.0, y: 50.0 })
        .clone();
    assert_eq!(shown.content, "Autauga County, AL: 21.3%");
    assert!(shown.is_visible());
    assert!(map.render_svg().contains("Autauga County, AL: 21.3%"));

    assert!(!map.hover(HoverEvent::Leave).is_visible());
}

#[wasm_bindgen_test]
fn color_scale_is_exposed() {
    assert_eq!(color_for(0.0), "#f7fbff");
    assert_eq!(color_for(80.0), "#08306b");
}
