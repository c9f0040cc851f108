use criterion::{Criterion, criterion_group, criterion_main};
use marlo::{Grammar, GrammarBuilder, Recognizer};
use std::hint::black_box;

/// S -> a S | a, the Leo fast path
fn right_recursive() -> Grammar<&'static str> {
    GrammarBuilder::new()
        .rule("S", ["a", "S"])
        .rule("S", ["a"])
        .build()
        .expect("grammar fits the packed rule encoding")
}

/// S -> S a | a, the plain Earley path
fn left_recursive() -> Grammar<&'static str> {
    GrammarBuilder::new()
        .rule("S", ["S", "a"])
        .rule("S", ["a"])
        .build()
        .expect("grammar fits the packed rule encoding")
}

fn bench_right_recursion(c: &mut Criterion) {
    let grammar = right_recursive();
    let mut group = c.benchmark_group("right_recursion");
    for n in [64usize, 256, 1024] {
        let input = vec!["a"; n];
        group.bench_function(format!("a^{n}"), |b| {
            let mut recognizer = Recognizer::new(&grammar);
            b.iter(|| black_box(recognizer.recognize(black_box(&input), "S")));
        });
    }
    group.finish();
}

fn bench_left_recursion(c: &mut Criterion) {
    let grammar = left_recursive();
    let mut group = c.benchmark_group("left_recursion");
    for n in [64usize, 256] {
        let input = vec!["a"; n];
        group.bench_function(format!("a^{n}"), |b| {
            let mut recognizer = Recognizer::new(&grammar);
            b.iter(|| black_box(recognizer.recognize(black_box(&input), "S")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_right_recursion, bench_left_recursion);
criterion_main!(benches);
