use criterion::{Criterion, black_box, criterion_group, criterion_main};
use editor::{convert, serialize_nodes, text_content};

const RUNS: usize = 2_000;

fn make_block_body(runs: usize) -> String {
    let mut out = String::with_capacity(runs * 80);
    for i in 0..runs {
        out.push_str("plain run ");
        out.push_str(&i.to_string());
        out.push_str(" <span class=\"gjs-inline-span-in-paragraph\">wrapped <b>text</b></span>");
        out.push_str(" <em>emphasis</em><!-- note -->");
    }
    out
}

fn bench_convert(c: &mut Criterion) {
    let input = make_block_body(RUNS);
    c.bench_function("bench_convert_block_body", |b| {
        b.iter(|| black_box(convert(black_box(&input)).len()));
    });
}

fn bench_serialize_nodes(c: &mut Criterion) {
    let nodes = convert(&make_block_body(RUNS));
    c.bench_function("bench_serialize_nodes", |b| {
        b.iter(|| black_box(serialize_nodes(black_box(&nodes)).len()));
    });
}

fn bench_text_content(c: &mut Criterion) {
    let nodes = convert(&make_block_body(RUNS));
    c.bench_function("bench_text_content", |b| {
        b.iter(|| black_box(text_content(black_box(&nodes)).len()));
    });
}

criterion_group!(benches, bench_convert, bench_serialize_nodes, bench_text_content);
criterion_main!(benches);
