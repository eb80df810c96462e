// crates/choromap-core/src/topology.rs

//! # TopoJSON decoding
//!
//! A topology stores every shared boundary once, as an *arc*. Geometries refer
//! to arcs by index; a negative index `!i` means arc `i` traversed backwards.
//! When the document carries a `transform`, arc positions are quantized and
//! delta-encoded and must be accumulated before scaling.
//!
//! Two operations are provided:
//! - [`Topology::feature`] / [`Topology::regions`]: stitch arcs back into
//!   drawable geometry per object member.
//! - [`Topology::mesh_with`]: collect the arcs of an object whose adjacent
//!   geometries satisfy a predicate, e.g. borders between different states.

use crate::error::{MapError, Result};
use crate::model::{Fips, Geometry, Position, Region};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Quantization transform applied to arc and point positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> Position {
        [
            x * self.scale[0] + self.translate[0],
            y * self.scale[1] + self.translate[1],
        ]
    }
}

/// A TopoJSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    pub objects: BTreeMap<String, TopoGeometry>,
    pub arcs: Vec<Vec<Vec<f64>>>,
}

/// A geometry object inside [`Topology::objects`].
///
/// `arcs` and `coordinates` nest differently per geometry type, so they are
/// kept as raw JSON and interpreted once the type is known. A `null` type is a
/// valid, empty geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub arcs: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub coordinates: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometries: Vec<TopoGeometry>,
}

/// A decoded member of a topology object.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<Value>,
    pub properties: Option<Value>,
    pub geometry: Geometry,
}

/// A leaf geometry as seen by a mesh predicate.
///
/// `index` is unique per leaf within the meshed object, so two sides of an
/// arc belong to the same geometry exactly when their indices are equal.
#[derive(Debug, Clone, Copy)]
pub struct MeshGeometry<'a> {
    pub index: usize,
    pub geometry: &'a TopoGeometry,
}

impl Topology {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn object(&self, name: &str) -> Result<&TopoGeometry> {
        self.objects
            .get(name)
            .ok_or_else(|| MapError::MissingObject(name.to_string()))
    }

    /// Decodes every member of object `name` into a [`Feature`].
    ///
    /// A `GeometryCollection` yields one feature per child; any other
    /// geometry yields a single feature.
    pub fn feature(&self, name: &str) -> Result<Vec<Feature>> {
        let object = self.object(name)?;
        let decoder = Decoder::new(self)?;

        let members: Vec<&TopoGeometry> = if object.kind.as_deref() == Some("GeometryCollection") {
            object.geometries.iter().collect()
        } else {
            vec![object]
        };

        members
            .into_iter()
            .map(|g| -> Result<Feature> {
                Ok(Feature {
                    id: g.id.clone(),
                    properties: g.properties.clone(),
                    geometry: decoder.geometry(g)?,
                })
            })
            .collect()
    }

    /// Like [`Topology::feature`], keeping only members with a numeric id.
    pub fn regions(&self, name: &str) -> Result<Vec<Region>> {
        let features = self.feature(name)?;
        let total = features.len();

        let regions: Vec<Region> = features
            .into_iter()
            .filter_map(|f| match f.id.as_ref().and_then(Fips::from_json) {
                Some(id) => Some(Region {
                    id,
                    geometry: f.geometry,
                }),
                None => {
                    warn!(id = ?f.id, object = name, "skipping geometry without a numeric id");
                    None
                }
            })
            .collect();

        debug!(object = name, total, kept = regions.len(), "decoded regions");
        Ok(regions)
    }

    /// Every arc of object `name`, each exactly once.
    pub fn mesh(&self, name: &str) -> Result<Geometry> {
        self.mesh_with(name, |_, _| true)
    }

    /// Arcs shared by two *different* geometries of object `name`.
    ///
    /// Arcs on the outer edge are referenced by a single geometry and are
    /// therefore excluded.
    pub fn interior_mesh(&self, name: &str) -> Result<Geometry> {
        self.mesh_with(name, |a, b| a.index != b.index)
    }

    /// Arcs of object `name` for which `filter(first, last)` holds, where
    /// `first` and `last` are the first and last leaf geometries referencing
    /// the arc. Each selected arc becomes one line, oriented as seen by
    /// `first`.
    pub fn mesh_with<F>(&self, name: &str, filter: F) -> Result<Geometry>
    where
        F: Fn(MeshGeometry<'_>, MeshGeometry<'_>) -> bool,
    {
        let object = self.object(name)?;
        let decoder = Decoder::new(self)?;

        let mut by_arc: Vec<Vec<(i64, MeshGeometry<'_>)>> = vec![Vec::new(); self.arcs.len()];
        let mut next_index = 0usize;
        collect_arc_refs(object, &mut next_index, &mut by_arc)?;

        let mut lines = Vec::new();
        for refs in &by_arc {
            let (Some(first), Some(last)) = (refs.first(), refs.last()) else {
                continue;
            };
            if filter(first.1, last.1) {
                lines.push(decoder.line(&[first.0])?);
            }
        }

        debug!(object = name, lines = lines.len(), "built mesh");
        Ok(Geometry::MultiLineString(lines))
    }
}

fn collect_arc_refs<'a>(
    g: &'a TopoGeometry,
    next_index: &mut usize,
    by_arc: &mut [Vec<(i64, MeshGeometry<'a>)>],
) -> Result<()> {
    if g.kind.as_deref() == Some("GeometryCollection") {
        for child in &g.geometries {
            collect_arc_refs(child, next_index, by_arc)?;
        }
        return Ok(());
    }

    let leaf = MeshGeometry {
        index: *next_index,
        geometry: g,
    };
    *next_index += 1;

    let mut refs = Vec::new();
    flatten_arc_refs(&g.arcs, &mut refs)?;
    for i in refs {
        let j = arc_slot(i, by_arc.len())?;
        by_arc[j].push((i, leaf));
    }
    Ok(())
}

fn flatten_arc_refs(value: &Value, out: &mut Vec<i64>) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::Number(n) => {
            let i = n.as_i64().ok_or_else(|| {
                MapError::InvalidTopology(format!("arc reference {n} is not an integer"))
            })?;
            out.push(i);
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(|v| flatten_arc_refs(v, out)),
        other => Err(MapError::InvalidTopology(format!(
            "unexpected arc reference {other}"
        ))),
    }
}

/// Maps a signed arc reference to its slot in the arc table.
fn arc_slot(i: i64, len: usize) -> Result<usize> {
    let j = if i < 0 { !i } else { i };
    usize::try_from(j)
        .ok()
        .filter(|&j| j < len)
        .ok_or_else(|| {
            MapError::InvalidTopology(format!("arc index {i} out of range ({len} arcs)"))
        })
}

fn parse<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| MapError::InvalidTopology(format!("{what}: {e}")))
}

/// Arc table with absolute positions, plus the transform for points.
struct Decoder {
    arcs: Vec<Vec<Position>>,
    transform: Option<Transform>,
}

impl Decoder {
    fn new(topology: &Topology) -> Result<Self> {
        let mut arcs = Vec::with_capacity(topology.arcs.len());

        for (n, raw) in topology.arcs.iter().enumerate() {
            let (mut x, mut y) = (0.0, 0.0);
            let mut arc = Vec::with_capacity(raw.len());
            for p in raw {
                let [px, py] = match p.as_slice() {
                    [px, py, ..] => [*px, *py],
                    _ => {
                        return Err(MapError::InvalidTopology(format!(
                            "arc {n} has a position with fewer than two coordinates"
                        )))
                    }
                };
                arc.push(match topology.transform {
                    Some(t) => {
                        x += px;
                        y += py;
                        t.apply(x, y)
                    }
                    None => [px, py],
                });
            }
            arcs.push(arc);
        }

        Ok(Decoder {
            arcs,
            transform: topology.transform,
        })
    }

    /// Appends arc `i` to `points`, dropping the joint shared with the
    /// previous arc.
    fn arc(&self, i: i64, points: &mut Vec<Position>) -> Result<()> {
        let arc = &self.arcs[arc_slot(i, self.arcs.len())?];
        points.pop();
        let start = points.len();
        points.extend_from_slice(arc);
        if i < 0 {
            points[start..].reverse();
        }
        Ok(())
    }

    fn line(&self, arcs: &[i64]) -> Result<Vec<Position>> {
        let mut points = Vec::new();
        for &i in arcs {
            self.arc(i, &mut points)?;
        }
        if points.len() < 2 {
            if let Some(&p) = points.first() {
                points.push(p);
            }
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> Result<Vec<Position>> {
        let mut points = self.line(arcs)?;
        while !points.is_empty() && points.len() < 4 {
            points.push(points[0]);
        }
        Ok(points)
    }

    fn point(&self, coordinates: &[f64]) -> Result<Position> {
        match coordinates {
            [x, y, ..] => Ok(match self.transform {
                Some(t) => t.apply(*x, *y),
                None => [*x, *y],
            }),
            _ => Err(MapError::InvalidTopology(
                "point with fewer than two coordinates".into(),
            )),
        }
    }

    fn geometry(&self, g: &TopoGeometry) -> Result<Geometry> {
        let geometry = match g.kind.as_deref() {
            None => Geometry::Empty,
            Some("GeometryCollection") => Geometry::Collection(
                g.geometries
                    .iter()
                    .map(|child| self.geometry(child))
                    .collect::<Result<_>>()?,
            ),
            Some("Point") => {
                let c: Vec<f64> = parse(&g.coordinates, "Point coordinates")?;
                Geometry::Point(self.point(&c)?)
            }
            Some("MultiPoint") => {
                let cs: Vec<Vec<f64>> = parse(&g.coordinates, "MultiPoint coordinates")?;
                Geometry::MultiPoint(
                    cs.iter()
                        .map(|c| self.point(c))
                        .collect::<Result<_>>()?,
                )
            }
            Some("LineString") => {
                let arcs: Vec<i64> = parse(&g.arcs, "LineString arcs")?;
                Geometry::LineString(self.line(&arcs)?)
            }
            Some("MultiLineString") => {
                let arcs: Vec<Vec<i64>> = parse(&g.arcs, "MultiLineString arcs")?;
                Geometry::MultiLineString(
                    arcs.iter()
                        .map(|a| self.line(a))
                        .collect::<Result<_>>()?,
                )
            }
            Some("Polygon") => {
                let arcs: Vec<Vec<i64>> = parse(&g.arcs, "Polygon arcs")?;
                Geometry::Polygon(
                    arcs.iter()
                        .map(|a| self.ring(a))
                        .collect::<Result<_>>()?,
                )
            }
            Some("MultiPolygon") => {
                let arcs: Vec<Vec<Vec<i64>>> = parse(&g.arcs, "MultiPolygon arcs")?;
                Geometry::MultiPolygon(
                    arcs.iter()
                        .map(|polygon| {
                            polygon
                                .iter()
                                .map(|a| self.ring(a))
                                .collect::<Result<Vec<_>>>()
                        })
                        .collect::<Result<_>>()?,
                )
            }
            Some(other) => {
                return Err(MapError::InvalidTopology(format!(
                    "unknown geometry type `{other}`"
                )))
            }
        };
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTIES: &str = include_str!("../tests/fixtures/counties.json");

    fn topology() -> Topology {
        Topology::from_json_str(COUNTIES).unwrap()
    }

    #[test]
    fn decodes_delta_encoded_polygon() {
        let regions = topology().regions("counties").unwrap();
        let first = &regions[0];
        assert_eq!(first.id, Fips(1001));
        assert_eq!(
            first.geometry,
            Geometry::Polygon(vec![vec![
                [12.0, 20.0],
                [12.0, 22.0],
                [10.0, 22.0],
                [10.0, 20.0],
                [12.0, 20.0],
            ]])
        );
    }

    #[test]
    fn negative_index_reverses_arc() {
        let regions = topology().regions("counties").unwrap();
        // Region 1003 starts with arc !0, i.e. the shared edge walked top-down.
        let Geometry::Polygon(rings) = &regions[1].geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0][0], [12.0, 22.0]);
        assert_eq!(rings[0][1], [12.0, 20.0]);
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[test]
    fn string_ids_are_accepted_and_null_ids_skipped() {
        let regions = topology().regions("counties").unwrap();
        let ids: Vec<u32> = regions.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1001, 1003, 2001]);
    }

    #[test]
    fn interior_mesh_keeps_only_shared_state_border() {
        let mesh = topology().interior_mesh("states").unwrap();
        assert_eq!(
            mesh,
            Geometry::MultiLineString(vec![vec![[14.0, 20.0], [14.0, 22.0]]])
        );
    }

    #[test]
    fn full_mesh_visits_every_arc_once() {
        let Geometry::MultiLineString(lines) = topology().mesh("counties").unwrap() else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn missing_object_is_reported() {
        let err = topology().feature("nation").unwrap_err();
        assert!(matches!(err, MapError::MissingObject(ref n) if n == "nation"));
    }

    #[test]
    fn out_of_range_arc_is_an_error() {
        let topo = Topology::from_json_str(
            r#"{"type":"Topology","arcs":[[[0,0],[1,1]]],
                "objects":{"x":{"type":"LineString","arcs":[3]}}}"#,
        )
        .unwrap();
        assert!(matches!(
            topo.feature("x"),
            Err(MapError::InvalidTopology(_))
        ));
    }

    #[test]
    fn untransformed_points_pass_through() {
        let topo = Topology::from_json_str(
            r#"{"type":"Topology","arcs":[],
                "objects":{"p":{"type":"Point","coordinates":[3.5,4.5]},
                           "n":{"type":null}}}"#,
        )
        .unwrap();
        assert_eq!(topo.feature("p").unwrap()[0].geometry, Geometry::Point([3.5, 4.5]));
        assert_eq!(topo.feature("n").unwrap()[0].geometry, Geometry::Empty);
    }
}
