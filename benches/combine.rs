//! Benchmarks for the wordlist combiner.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordloom::wordlist::{ChunkResult, CombineOptions, WordPair, combine};

/// Build `chunks` chunks of `pairs_per_chunk` pairs each, with some
/// cross-chunk duplicates so dedup does real work.
fn make_chunks(chunks: u32, pairs_per_chunk: usize) -> Vec<ChunkResult> {
    (0..chunks)
        .map(|position| {
            let words = (0..pairs_per_chunk)
                .map(|i| {
                    // Every third pair repeats a word from the previous chunk.
                    let word_id = if i % 3 == 0 && position > 0 {
                        (position as usize - 1) * pairs_per_chunk + i
                    } else {
                        position as usize * pairs_per_chunk + i
                    };
                    WordPair::new(format!("word-{word_id}"), format!("translation-{word_id}"))
                })
                .collect();
            ChunkResult::new(format!("chunk-{position}"), position, words)
        })
        .collect()
}

fn bench_combine(c: &mut Criterion) {
    let chunks = make_chunks(50, 20);
    let options = CombineOptions {
        max_words: 50,
        ..Default::default()
    };

    c.bench_function("combine_50x20", |bench| {
        bench.iter(|| black_box(combine(&chunks, &options).unwrap()))
    });
}

fn bench_combine_small(c: &mut Criterion) {
    let chunks = make_chunks(5, 10);
    let options = CombineOptions::default();

    c.bench_function("combine_5x10", |bench| {
        bench.iter(|| black_box(combine(&chunks, &options).unwrap()))
    });
}

criterion_group!(benches, bench_combine, bench_combine_small);
criterion_main!(benches);
