//! Benchmarks for the table cell titles pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use cell_titles::export::synthesize_html;
use cell_titles::import::parse_markdown;
use cell_titles::{Options, Pipeline, TableCellTitles, annotate_tables};

/// A document with `tables` tables of 6 columns and 50 rows each.
fn sample_markdown(tables: usize) -> String {
    let mut md = String::new();
    for t in 0..tables {
        md.push_str(&format!("## Table {t}\n\n"));
        md.push_str("| Name | **Price** | Qty | [Vendor](https://example.com) | Notes | `id` |\n");
        md.push_str("| ---- | --------: | --- | ----------------------------- | ----- | ---- |\n");
        for row in 0..50 {
            md.push_str(&format!(
                "| item {row} | {}.99 | {row} | acme | *fragile* | {t}-{row} |\n",
                row * 3
            ));
        }
        md.push('\n');
    }
    md
}

fn bench_annotate(c: &mut Criterion) {
    let doc = parse_markdown(&sample_markdown(20));
    let options = Options::default();

    c.bench_function("annotate_tables", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                annotate_tables(&mut doc, &options);
                black_box(doc)
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let markdown = sample_markdown(20);
    let pipeline = Pipeline::new().with(TableCellTitles::default());

    c.bench_function("parse_annotate_render", |b| {
        b.iter(|| black_box(pipeline.process(black_box(&markdown))));
    });

    let doc = parse_markdown(&markdown);
    c.bench_function("synthesize_html", |b| {
        b.iter(|| black_box(synthesize_html(black_box(&doc))));
    });
}

criterion_group!(benches, bench_annotate, bench_pipeline);
criterion_main!(benches);
