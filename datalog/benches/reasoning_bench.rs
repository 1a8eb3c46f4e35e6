/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate criterion;
extern crate datalog;

use criterion::*;
use datalog::parser_kb_logic::parse_query;
use datalog::KnowledgeBase;

/// A linear chain `(step0 ?x) -> (step1 ?x) -> ... -> (stepN ?x)` over `width` constants.
fn chain_source(depth: usize, width: usize) -> String {
    let mut source = String::new();
    for i in 0..depth {
        source.push_str(&format!("rule: ((step{} ?x)) -> (step{} ?x)\n", i, i + 1));
    }
    for j in 0..width {
        source.push_str(&format!("fact: (step0 c{})\n", j));
    }
    source
}

fn join_source(width: usize) -> String {
    let mut source = String::from("rule: ((edge ?x ?y) (edge ?y ?z)) -> (path2 ?x ?z)\n");
    for j in 0..width {
        source.push_str(&format!("fact: (edge n{} n{})\n", j, j + 1));
    }
    source
}

fn bench_forward_chaining(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_chaining");
    for depth in [10usize, 50] {
        let source = chain_source(depth, 20);
        group.bench_with_input(BenchmarkId::new("chain", depth), &source, |b, source| {
            b.iter(|| {
                let mut kb = KnowledgeBase::default();
                kb.load_str(black_box(source)).unwrap();
                kb
            })
        });
    }
    let source = join_source(100);
    group.bench_function("join_edges_100", |b| {
        b.iter(|| {
            let mut kb = KnowledgeBase::default();
            kb.load_str(black_box(&source)).unwrap();
            kb
        })
    });
    group.finish();
}

fn bench_retraction_cascade(c: &mut Criterion) {
    let mut kb = KnowledgeBase::default();
    kb.load_str(&chain_source(50, 20)).unwrap();
    let root = parse_query("(step0 c0)", &mut kb.dictionary).unwrap();

    c.bench_function("retract_chain_50", |b| {
        b.iter_batched(
            || kb.clone(),
            |mut kb| {
                kb.retract(black_box(&root));
                kb
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_ask(c: &mut Criterion) {
    let mut kb = KnowledgeBase::default();
    kb.load_str(&chain_source(10, 200)).unwrap();
    let query = parse_query("(step10 ?x)", &mut kb.dictionary).unwrap();

    c.bench_function("ask_pattern", |b| b.iter(|| kb.ask(black_box(&query))));
}

criterion_group!(benches, bench_forward_chaining, bench_retraction_cascade, bench_ask);
criterion_main!(benches);
