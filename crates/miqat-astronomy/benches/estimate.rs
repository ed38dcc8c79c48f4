use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use miqat_astronomy::{estimate_current, estimate_for_date, last_third_of_night, qibla_bearing};
use miqat_types::{Coordinate, Locale};
use std::hint::black_box;

fn bench_estimators(c: &mut Criterion) {
    let jakarta = Coordinate::new_unchecked(-6.2088, 106.8456);
    let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap_or(NaiveDate::MIN);

    c.bench_function("estimate_current", |b| {
        b.iter(|| estimate_current(black_box(jakarta), date, Locale::Arabic))
    });
    c.bench_function("estimate_for_date", |b| {
        b.iter(|| estimate_for_date(black_box(jakarta), date, Locale::Latin))
    });
    c.bench_function("last_third_of_night", |b| {
        b.iter(|| last_third_of_night(black_box(jakarta), date))
    });
    c.bench_function("qibla_bearing", |b| b.iter(|| qibla_bearing(black_box(jakarta))));
}

criterion_group!(benches, bench_estimators);
criterion_main!(benches);
