// crates/choromap-core/src/model.rs
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// County identifier (Federal Information Processing Standard code).
///
/// Datasets disagree on the encoding: the education records carry plain
/// numbers (`1001`) while some topology producers emit zero-padded strings
/// (`"01001"`). Both deserialize to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fips(pub u32);

impl Fips {
    /// Lenient conversion used for topology ids, which are not guaranteed to
    /// be numeric.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                n.as_u64().and_then(|n| u32::try_from(n).ok()).map(Fips)
            }
            serde_json::Value::String(s) => s.trim().parse().ok().map(Fips),
            _ => None,
        }
    }
}

impl fmt::Display for Fips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Fips {
    fn from(v: u32) -> Self {
        Fips(v)
    }
}

impl<'de> Deserialize<'de> for Fips {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(n) => u32::try_from(n)
                .map(Fips)
                .map_err(|_| de::Error::custom(format!("fips {n} out of range"))),
            Repr::Str(s) => s
                .trim()
                .parse()
                .map(Fips)
                .map_err(|_| de::Error::custom(format!("fips `{s}` is not numeric"))),
        }
    }
}

/// One row of the education dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub fips: Fips,
    pub state: String,
    pub area_name: String,
    /// Share of adults holding a bachelor's degree or higher, in percent.
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
}

/// Screen-space coordinate. The topology is pre-projected, so no projection
/// is applied before drawing.
pub type Position = [f64; 2];

/// Decoded geometry of a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    /// Rings are closed: the last position repeats the first.
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    Collection(Vec<Geometry>),
    Empty,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Empty => true,
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::LineString(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.is_empty(),
            Geometry::Polygon(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::Collection(v) => v.iter().all(Geometry::is_empty),
            Geometry::Point(_) => false,
        }
    }
}

/// A county shape ready to be joined and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: Fips,
    pub geometry: Geometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips_accepts_numbers_and_padded_strings() {
        let a: Fips = serde_json::from_str("1001").unwrap();
        let b: Fips = serde_json::from_str("\"01001\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1001");
    }

    #[test]
    fn fips_rejects_text() {
        assert!(serde_json::from_str::<Fips>("\"USA\"").is_err());
        assert_eq!(Fips::from_json(&serde_json::json!("USA")), None);
        assert_eq!(Fips::from_json(&serde_json::json!(-4)), None);
    }

    #[test]
    fn education_record_uses_source_field_names() {
        let json = r#"{"fips":1001,"state":"AL","area_name":"Autauga County",
            "bachelorsOrHigher":21.3}"#;
        let rec: EducationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.fips, Fips(1001));
        assert_eq!(rec.area_name, "Autauga County");
        assert_eq!(rec.bachelors_or_higher, 21.3);
    }
}
