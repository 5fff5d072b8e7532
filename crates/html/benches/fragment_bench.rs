use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use core_types::NodePath;
use html::range::{self, Boundary, DomRange};
use html::{Node, parse_fragment, serialize_fragment, tokenize};

const SMALL_PARAGRAPHS: usize = 16;
const LARGE_PARAGRAPHS: usize = 4_000;

fn make_paragraphs(count: usize) -> String {
    let mut out = String::with_capacity(count * 64);
    for i in 0..count {
        out.push_str("<p class=\"copy\">Line ");
        out.push_str(&i.to_string());
        out.push_str(" with <b>bold</b>, <i>italic</i> &amp; <span>inline</span> text</p>");
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let input = make_paragraphs(LARGE_PARAGRAPHS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

fn bench_parse_small(c: &mut Criterion) {
    let input = make_paragraphs(SMALL_PARAGRAPHS);
    c.bench_function("bench_parse_fragment_small", |b| {
        b.iter(|| black_box(parse_fragment(black_box(&input)).len()));
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let input = make_paragraphs(LARGE_PARAGRAPHS);
    c.bench_function("bench_parse_fragment_large", |b| {
        b.iter(|| black_box(parse_fragment(black_box(&input)).len()));
    });
}

fn bench_serialize_large(c: &mut Criterion) {
    let nodes = parse_fragment(&make_paragraphs(LARGE_PARAGRAPHS));
    c.bench_function("bench_serialize_fragment_large", |b| {
        b.iter(|| black_box(serialize_fragment(black_box(&nodes)).len()));
    });
}

fn bench_delete_contents(c: &mut Criterion) {
    let input = make_paragraphs(SMALL_PARAGRAPHS);
    c.bench_function("bench_range_delete_contents", |b| {
        b.iter_batched(
            || {
                parse_fragment(&input)
                    .into_iter()
                    .fold(Node::element("div"), Node::with_child)
            },
            |mut root| {
                let count = root.children().len();
                let range = DomRange::new(
                    Boundary::new(NodePath::root(), 1),
                    Boundary::new(NodePath::root(), count.saturating_sub(1)),
                );
                black_box(range::delete_contents(&mut root, &range));
                root
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_parse_small,
    bench_parse_large,
    bench_serialize_large,
    bench_delete_contents
);
criterion_main!(benches);
