// crates/choromap-core/src/join.rs
use crate::model::{Fips, Region};
use crate::scale::ColorScale;
use crate::traits::RecordLookup;
use serde::Serialize;
use tracing::warn;

/// A region paired with the statistic that colors it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRegion {
    pub id: Fips,
    /// Index into the region list the join was run on.
    pub region: usize,
    /// Index of the matching record, if any.
    pub record: Option<usize>,
    /// Percentage used for coloring; 0 when no record matched.
    pub education: f64,
    pub bucket: usize,
    pub fill: String,
}

impl JoinedRegion {
    pub fn is_matched(&self) -> bool {
        self.record.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinOutcome {
    /// One entry per input region, in input order.
    pub regions: Vec<JoinedRegion>,
    /// Ids for which no record exists, in input order.
    pub unmatched: Vec<Fips>,
}

/// Pairs every region with the first record sharing its id and colors it.
///
/// A region without a record is not an error: it is drawn with the color of
/// 0% and reported in [`JoinOutcome::unmatched`].
pub fn join_regions<L>(regions: &[Region], records: &L, scale: &ColorScale) -> JoinOutcome
where
    L: RecordLookup + ?Sized,
{
    let mut out = JoinOutcome {
        regions: Vec::with_capacity(regions.len()),
        unmatched: Vec::new(),
    };

    for (i, region) in regions.iter().enumerate() {
        let (record, education) = match records.find_record_indexed(region.id) {
            Some((idx, rec)) => (Some(idx), rec.bachelors_or_higher),
            None => {
                warn!(fips = %region.id, "could not find education data for county");
                out.unmatched.push(region.id);
                (None, 0.0)
            }
        };

        let bucket = scale.bucket(education);
        out.regions.push(JoinedRegion {
            id: region.id,
            region: i,
            record,
            education,
            bucket,
            fill: scale.colors()[bucket].clone(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationRecord, Geometry};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn region(id: u32) -> Region {
        Region {
            id: Fips(id),
            geometry: Geometry::Empty,
        }
    }

    fn record(id: u32, pct: f64) -> EducationRecord {
        EducationRecord {
            fips: Fips(id),
            state: "AL".into(),
            area_name: format!("County {id}"),
            bachelors_or_higher: pct,
        }
    }

    #[test]
    fn matched_region_takes_record_color() {
        let scale = ColorScale::education();
        let records = vec![record(1001, 21.3)];
        let out = join_regions(&[region(1001)], &records, &scale);

        let joined = &out.regions[0];
        assert!(joined.is_matched());
        assert_eq!(joined.education, 21.3);
        assert_eq!(joined.fill, scale.color(21.3));
        assert!(out.unmatched.is_empty());
    }

    #[test]
    fn unmatched_region_falls_back_to_zero() {
        let scale = ColorScale::education();
        let records = vec![record(1001, 21.3)];
        let out = join_regions(&[region(1001), region(4242)], &records, &scale);

        let joined = &out.regions[1];
        assert!(!joined.is_matched());
        assert_eq!(joined.education, 0.0);
        assert_eq!(joined.fill, scale.color(0.0));
        assert_eq!(out.unmatched, vec![Fips(4242)]);
    }

    #[test]
    fn unmatched_region_logs_a_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let scale = ColorScale::education();
        let records = vec![record(1001, 21.3)];
        tracing::subscriber::with_default(subscriber, || {
            join_regions(&[region(1001), region(4242)], &records, &scale);
        });

        let out = logs.contents();
        let lines: Vec<&str> = out.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(lines.len(), 1, "{out}");
        assert!(lines[0].contains("fips=4242"), "{out}");
        assert!(!out.contains("fips=1001"), "{out}");
    }

    #[test]
    fn first_record_wins_on_duplicate_ids() {
        let scale = ColorScale::education();
        let records = vec![record(7, 10.0), record(7, 70.0)];
        let out = join_regions(&[region(7)], records.as_slice(), &scale);
        assert_eq!(out.regions[0].record, Some(0));
        assert_eq!(out.regions[0].education, 10.0);
    }
}
