// crates/choromap-core/src/traits.rs
use crate::model::{EducationRecord, Fips};

/// Resolves a county id to its education record.
///
/// The join only needs "first record with this id"; implementors decide how
/// to find it. The slice implementation scans linearly, which is plenty for
/// the ~3k counties of the dataset.
///
/// # Examples
/// ```rust
/// use choromap_core::{EducationRecord, Fips, RecordLookup};
///
/// let records = vec![EducationRecord {
///     fips: Fips(1001),
///     state: "AL".into(),
///     area_name: "Autauga".into(),
///     bachelors_or_higher: 21.3,
/// }];
/// assert!(records.find_record(Fips(1001)).is_some());
/// assert!(records.find_record(Fips(1003)).is_none());
/// ```
pub trait RecordLookup {
    /// Position and value of the first record whose `fips` equals `id`.
    fn find_record_indexed(&self, id: Fips) -> Option<(usize, &EducationRecord)>;

    #[inline]
    fn find_record(&self, id: Fips) -> Option<&EducationRecord> {
        self.find_record_indexed(id).map(|(_, r)| r)
    }
}

impl RecordLookup for [EducationRecord] {
    fn find_record_indexed(&self, id: Fips) -> Option<(usize, &EducationRecord)> {
        self.iter().enumerate().find(|(_, r)| r.fips == id)
    }
}

impl RecordLookup for Vec<EducationRecord> {
    #[inline]
    fn find_record_indexed(&self, id: Fips) -> Option<(usize, &EducationRecord)> {
        self.as_slice().find_record_indexed(id)
    }
}
