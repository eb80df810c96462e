use choromap_core::join::join_regions;
use choromap_core::{ColorScale, EducationRecord, Fips, Geometry, Region};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Roughly the size of the real dataset: ~3.2k counties, a few without data.
fn dataset() -> (Vec<Region>, Vec<EducationRecord>) {
    let ids: Vec<u32> = (1..=56)
        .flat_map(|state| (1..=58).map(move |county| state * 1000 + county * 2 - 1))
        .collect();

    let regions = ids
        .iter()
        .map(|&id| Region {
            id: Fips(id),
            geometry: Geometry::Empty,
        })
        .collect();

    let records = ids
        .iter()
        .filter(|&&id| id % 97 != 0)
        .map(|&id| EducationRecord {
            fips: Fips(id),
            state: "XX".into(),
            area_name: format!("County {id}"),
            bachelors_or_higher: f64::from(id % 70) + 2.6,
        })
        .collect();

    (regions, records)
}

fn bench_join(c: &mut Criterion) {
    let (regions, records) = dataset();
    let scale = ColorScale::education();

    c.bench_function("join_regions linear scan", |b| {
        b.iter(|| join_regions(black_box(&regions), black_box(records.as_slice()), &scale))
    });

    c.bench_function("color lookup", |b| {
        b.iter(|| {
            let mut n = 0usize;
            let mut v = 0.0;
            while v < 80.0 {
                n += scale.bucket(black_box(v));
                v += 0.1;
            }
            n
        })
    });
}

criterion_group!(benches, bench_join);
criterion_main!(benches);
