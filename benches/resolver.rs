//! Benchmarks for predicate resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seshat::lexicon::{RuleLemmatizer, StaticSynonyms};
use seshat::registry::Registry;
use seshat::resolve::{CategoryResolver, DictionaryResolver};

fn bench_dictionary(c: &mut Criterion) {
    let registry = Registry::builtin();
    let resolver = DictionaryResolver::new(&registry);
    let lemmatizer = RuleLemmatizer::new();

    c.bench_function("dictionary_hit", |bench| {
        bench.iter(|| black_box(resolver.resolve(black_box("knows"), &lemmatizer)))
    });

    c.bench_function("dictionary_fallback", |bench| {
        bench.iter(|| black_box(resolver.resolve(black_box("collaborates with"), &lemmatizer)))
    });
}

fn bench_category(c: &mut Criterion) {
    let registry = Registry::builtin();
    let lemmatizer = RuleLemmatizer::new();
    let synonyms = StaticSynonyms::builtin();
    let resolver = CategoryResolver::new(&registry, &lemmatizer, &synonyms);

    c.bench_function("category_keyword_hit", |bench| {
        bench.iter(|| black_box(resolver.resolve(black_box("observes temperature"))))
    });

    c.bench_function("category_general_fallback", |bench| {
        bench.iter(|| black_box(resolver.resolve(black_box("xyzzy"))))
    });
}

criterion_group!(benches, bench_dictionary, bench_category);
criterion_main!(benches);
