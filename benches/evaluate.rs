use criterion::{black_box, criterion_group, criterion_main, Criterion};
use circ_rules::{Lookup, RuleSet};

/// Build a document with `n` flat rules, each constraining a distinct
/// material type plus a shared patron group.
fn build_document(n: usize) -> String {
    let mut text =
        String::from("fallback-policy: l: fb-loan r: fb-request n: fb-notice o: fb-overdue i: fb-lost\n");
    for i in 0..n {
        text.push_str(&format!(
            "m material-{i} g staff: l: loan-{i} r: fb-request n: fb-notice o: fb-overdue i: fb-lost\n"
        ));
    }
    text
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for &n in &[10, 100, 1000] {
        let rules = RuleSet::from_text(&build_document(n)).unwrap();
        let lookup = Lookup::new()
            .material_type(format!("material-{}", n / 2))
            .patron_group("staff");

        group.bench_function(&format!("{n}_rules_single"), |b| {
            b.iter(|| rules.select(black_box(&lookup)));
        });
        group.bench_function(&format!("{n}_rules_all"), |b| {
            b.iter(|| rules.select_all(black_box(&lookup)));
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for &n in &[10, 100] {
        let text = build_document(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| RuleSet::from_text(black_box(&text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select, bench_compile);
criterion_main!(benches);
