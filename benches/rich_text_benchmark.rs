//! Benchmarks for rich text parsing and document rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docgen::render::{creator_for, DocumentCreator};
use docgen::{
    BodySectionOptions, DocumentBuilder, OutputFormat, PlainFontSettingsFactory, RenderOptions,
    RichTextParser, TablesRow,
};

/// Creates markup with the given number of styled sentences.
fn create_markup(sentences: usize) -> String {
    (0..sentences)
        .map(|i| match i % 3 {
            0 => format!("Sentence {} has **bold** words. ", i),
            1 => format!("Sentence {} has _italic_ and __underlined__ words. ", i),
            _ => format!("Sentence {} is **bold with _italic_ inside**.\n", i),
        })
        .collect()
}

/// Creates a builder with a header, footer and `sections` body sections.
fn create_builder(sections: usize) -> DocumentBuilder<PlainFontSettingsFactory> {
    let mut builder = DocumentBuilder::default();
    builder
        .header(|h| h.add_row(TablesRow::from_strings(["Logo", "Title"]).widths([40, 60])))
        .footer(|f| f.add_row(TablesRow::from_strings(["Footer"])));
    for i in 0..sections {
        builder.body_section_with_options(
            format!("Section {}", i + 1),
            create_markup(5),
            BodySectionOptions::new().with_level((i % 3) as i32 + 1),
        );
    }
    builder
}

/// Benchmark parsing markup of various lengths.
fn bench_rich_text_parsing(c: &mut Criterion) {
    let parser = RichTextParser::new();
    let mut group = c.benchmark_group("rich_text_parsing");

    for sentences in [1, 10, 100].iter() {
        let markup = create_markup(*sentences);

        group.bench_function(format!("{}_sentences", sentences), |b| {
            b.iter(|| parser.parse(black_box(&markup)).count());
        });
    }

    group.finish();
}

/// Benchmark rendering a document in every format.
fn bench_rendering(c: &mut Criterion) {
    let doc = create_builder(20).build();
    let mut group = c.benchmark_group("rendering");

    for format in OutputFormat::ALL {
        let creator = creator_for(format, RenderOptions::default());
        group.bench_function(format.name(), |b| {
            b.iter(|| creator.create_document(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark builder overhead.
fn bench_document_build(c: &mut Criterion) {
    c.bench_function("document_build", |b| {
        b.iter(|| create_builder(black_box(10)).build());
    });
}

criterion_group!(
    benches,
    bench_rich_text_parsing,
    bench_rendering,
    bench_document_build,
);
criterion_main!(benches);
