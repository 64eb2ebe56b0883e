//! Benchmarks for pdfsplit.
//!
//! Run with: cargo bench
//!
//! Documents are generated with lopdf, one labeled form per page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfsplit::{NameResolver, SourceDocument, Splitter, Strategy};

/// Creates a PDF with `page_count` registration forms.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..page_count {
        let lines = [
            "FICHA CADASTRAL".to_string(),
            "NOME COMPLETO".to_string(),
            format!("FUNCIONARIO NUMERO {}", to_letters(i)),
            "CPF 000.000.000-00".to_string(),
        ];
        let mut operations = Vec::new();
        for (n, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
            operations.push(Operation::new("Td", vec![50.into(), (780 - 16 * n as i64).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Names may not contain digits, so page numbers are spelled as letters.
fn to_letters(mut n: usize) -> String {
    let mut out = String::new();
    loop {
        out.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            return out;
        }
    }
}

/// Benchmark the two name resolvers on extracted-looking text.
fn bench_resolvers(c: &mut Criterion) {
    let labeled_text = "FICHA CADASTRAL\nNOME COMPLETO\nJOAO DA SILVA\nCPF 000.000.000-00\n";
    let anchored_text =
        "Folha Mensal\nDepartamento\nFilial\nMARIA OLIVEIRA\n123456 AUXILIAR\nSalario 1.000,00\n";

    let labeled = Strategy::LabeledField.resolver();
    let anchored = Strategy::AnchoredHeuristic.resolver();

    c.bench_function("resolve_labeled", |b| {
        b.iter(|| labeled.resolve(black_box(labeled_text)));
    });
    c.bench_function("resolve_anchored", |b| {
        b.iter(|| anchored.resolve(black_box(anchored_text)));
    });
}

/// Benchmark full runs, parallel against sequential.
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for page_count in [1, 10, 50].iter() {
        let data = create_test_pdf(*page_count);
        let doc = SourceDocument::from_bytes(&data).unwrap();

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            let splitter = Splitter::new(Strategy::LabeledField);
            b.iter(|| splitter.run(black_box(&doc)));
        });
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            let splitter = Splitter::new(Strategy::LabeledField).sequential();
            b.iter(|| splitter.run(black_box(&doc)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolvers, bench_split);
criterion_main!(benches);
