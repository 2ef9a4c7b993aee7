//! Snapshot publication and read latency

use chrono_common::record::Chrono;
use chrono_shm::{SnapshotReader, SnapshotWriter};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_publish(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = SnapshotWriter::create(dir.path(), "bench_publish").unwrap();
    let mut chrono = Chrono::default();

    c.bench_function("snapshot_publish", |b| {
        b.iter(|| {
            chrono.current_lap_time = chrono.current_lap_time.wrapping_add(1);
            writer.publish(black_box(&chrono));
        })
    });
}

fn bench_read(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = SnapshotWriter::create(dir.path(), "bench_read").unwrap();
    writer.publish(&Chrono {
        best_lap_time: 3000,
        ..Chrono::default()
    });
    let mut reader = SnapshotReader::attach(dir.path(), "bench_read").unwrap();

    c.bench_function("snapshot_read", |b| {
        b.iter(|| black_box(reader.read().unwrap()))
    });
}

criterion_group!(benches, bench_publish, bench_read);
criterion_main!(benches);
