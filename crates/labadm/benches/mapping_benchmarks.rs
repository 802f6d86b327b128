//! Mapping performance benchmarks.
//!
//! Measures parsing and batch assembly across table sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use labadm::{InstrumentAdapter, Parser, ViCellBluAdapter};

const HEADER: &str = "Sample ID\tAnalysis date/time\tAnalysis by\tCell type\tDilution\t\
                      Viability (%)\tViable (x10^6) cells/mL\tTotal (x10^6) cells/mL\t\
                      Cell count\tViable cells\tAverage diameter (μm)\tAverage circularity";

/// Generate a synthetic Vi-CELL BLU export with the given number of rows.
fn generate_export(rows: usize) -> String {
    let mut data = String::from(HEADER);
    data.push('\n');

    for row in 0..rows {
        data.push_str(&format!(
            "S{:06}\t2022-03-21 13:{:02}:{:02}\t{}\tCHO\t1\t\
             {:.1}\t{:.2}\t{:.2}\t{:.1}\t{}\t{:.1}\t0.{}\n",
            row,
            (row / 60) % 60,
            row % 60,
            if row % 3 == 0 { "" } else { "jdoe" },
            80.0 + (row % 20) as f64,
            1.0 + (row % 7) as f64 * 0.5,
            1.2 + (row % 7) as f64 * 0.5,
            1000.0 + row as f64 * 1.5,
            900 + row,
            12.0 + (row % 5) as f64,
            80 + row % 20,
        ));
    }

    data
}

/// Benchmark reading exports of various sizes.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_export");
    let parser = Parser::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_export(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| parser.parse_str(black_box(data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark row mapping and batch assembly over a parsed table.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_batch");
    let parser = Parser::new();
    let adapter = ViCellBluAdapter::new();

    for rows in [100, 1_000, 10_000].iter() {
        let table = parser.parse_str(&generate_export(*rows)).unwrap();
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| adapter.create_data(black_box(table)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_assemble);
criterion_main!(benches);
