use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fa_toolkit::{prelude::*, random};

fn conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let mut rng = fastrand::Rng::with_seed(0xbe7c);

    for states in [4usize, 8, 12] {
        let lnfa = random::random_definition(&mut rng, states, 2, 0.2, 0.1);
        let nfa = lnfa.eliminate_epsilon();
        let dfa = random::random_dfa(&mut rng, states * 4, 3, 0.9);

        group.bench_with_input(
            BenchmarkId::new("eliminate_epsilon", states),
            &lnfa,
            |b, lnfa| b.iter(|| black_box(lnfa.eliminate_epsilon())),
        );
        group.bench_with_input(
            BenchmarkId::new("subset_construction", states),
            &nfa,
            |b, nfa| b.iter(|| black_box(nfa.subset_construction())),
        );
        group.bench_with_input(BenchmarkId::new("minimize", states * 4), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa.minimize()))
        });
        group.bench_with_input(
            BenchmarkId::new("canonicalize", states * 4),
            &dfa,
            |b, dfa| b.iter(|| black_box(dfa.canonicalize())),
        );
    }

    group.finish();
}

fn queries(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(0x9e77);
    let definition = random::random_definition(&mut rng, 10, 3, 0.15, 0.1);
    let words: Vec<Vec<String>> = (0..64)
        .map(|_| random::random_word(&mut rng, definition.alphabet(), 5, 40))
        .collect();

    let mut group = c.benchmark_group("queries");
    for variant in [Variant::EpsilonNfa, Variant::Nfa, Variant::Dfa] {
        group.bench_function(variant.to_string(), |b| {
            let mut automaton = definition.automaton(variant);
            b.iter(|| {
                for word in &words {
                    black_box(automaton.accepts(word));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, conversions, queries);
criterion_main!(benches);
