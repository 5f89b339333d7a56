use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xmlschema_datatypes::{Builtin, Restriction, SchemaGraphBuilder, SimpleTypeValidator};

fn sample_values() -> Vec<(Builtin, &'static str)> {
    vec![
        (Builtin::Decimal, " 12345.678900 "),
        (Builtin::Int, "-2147483648"),
        (Builtin::Double, "6.02214076E23"),
        (Builtin::DateTime, "1999-12-31T24:00:00+05:30"),
        (Builtin::Duration, "P1Y2M3DT10H30M12.5S"),
        (Builtin::HexBinary, "0FB7DEADBEEF"),
        (Builtin::Base64Binary, "SGVsbG8sIFdvcmxkIQ=="),
        (Builtin::Language, "en-US"),
        (Builtin::Nmtokens, "alpha beta gamma delta epsilon"),
    ]
}

fn benchmark_builtins(c: &mut Criterion) {
    let graph = SchemaGraphBuilder::new().build();
    let validator = SimpleTypeValidator::new(&graph);
    let mut group = c.benchmark_group("builtins");
    for (builtin, text) in sample_values() {
        let ty = graph.builtin(builtin);
        group.bench_with_input(BenchmarkId::from_parameter(builtin), &text, |b, text| {
            b.iter(|| {
                let validated = validator.validate(ty, black_box(text), None).expect("valid input");
                black_box(validated);
            })
        });
    }
    group.finish();
}

fn benchmark_derived(c: &mut Criterion) {
    let mut builder = SchemaGraphBuilder::new();
    let decimal = builder.builtin(Builtin::Decimal);
    let price = builder
        .restrict(
            decimal,
            Restriction::new()
                .total_digits(9)
                .fraction_digits(2)
                .min_inclusive("0")
                .max_exclusive("1000000"),
        )
        .expect("valid restriction");
    let int = builder.builtin(Builtin::Int);
    let nmtoken = builder.builtin(Builtin::Nmtoken);
    let union = builder.union(None, vec![int, nmtoken]).expect("valid union");
    let ints = builder.list(None, int).expect("valid list");
    let graph = builder.build();
    let validator = SimpleTypeValidator::new(&graph);
    let list_text = (0..256).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");

    c.bench_function("derived/restricted_decimal", |b| {
        b.iter(|| black_box(validator.validate(price, black_box("12345.60"), None)))
    });
    c.bench_function("derived/union_fallback", |b| {
        b.iter(|| black_box(validator.validate(union, black_box("3.1415926"), None)))
    });
    c.bench_function("derived/list_256_ints", |b| {
        b.iter(|| black_box(validator.validate(ints, black_box(&list_text), None)))
    });
}

criterion_group!(benches, benchmark_builtins, benchmark_derived);
criterion_main!(benches);
