// Benchmark for cell-map construction
// Measures building the hour-row occupancy map for busy days at each unit

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planner_timetable::models::time_block::TimeBlock;
use planner_timetable::services::timetable::{build_cell_map, TimeUnit};

/// `count` back-to-back blocks of `length` minutes starting at 06:00
fn busy_day(count: u32, length: u32) -> Vec<TimeBlock> {
    (0..count)
        .filter_map(|i| {
            let start = 6 * 60 + i * length;
            let end = start + length;
            if end > 24 * 60 {
                return None;
            }
            TimeBlock::builder()
                .id(format!("block-{}", i))
                .title("Busy")
                .time_range(
                    format!("{:02}:{:02}", start / 60, start % 60),
                    format!("{:02}:{:02}", end / 60, end % 60),
                )
                .build()
                .ok()
        })
        .collect()
}

fn bench_build_cell_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_cell_map");

    for unit in TimeUnit::ALL {
        let blocks = busy_day(36, 25);
        group.bench_with_input(BenchmarkId::new("busy_day", unit.minutes()), &blocks, |b, blocks| {
            b.iter(|| build_cell_map(black_box(blocks), black_box(unit)));
        });
    }

    let long_blocks = busy_day(4, 240);
    group.bench_function("long_blocks_5min", |b| {
        b.iter(|| build_cell_map(black_box(&long_blocks), black_box(TimeUnit::Five)));
    });

    group.finish();
}

criterion_group!(benches, bench_build_cell_map);
criterion_main!(benches);
