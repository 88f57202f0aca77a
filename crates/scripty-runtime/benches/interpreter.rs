//! Interpreter execution benchmarks
//!
//! Benchmarks the pipeline on canonical programs that stress different
//! execution paths:
//! - Lexing and parsing alone
//! - Arithmetic and loop performance
//! - Function call overhead and recursion
//! - Scope depth impact on variable lookup

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scripty_runtime::{Interpreter, Lexer, Parser};

/// Run the full pipeline, discarding printed output
fn interp_run(source: &str) {
    let tokens = Lexer::new(source).tokenize().unwrap();
    let program = Parser::new(tokens).parse().unwrap();
    let mut interp = Interpreter::new(std::io::sink());
    let _ = interp.run(&program);
}

/// Parse source code (for measuring parse vs execution time)
fn parse_only(source: &str) {
    let tokens = Lexer::new(source).tokenize().unwrap();
    let _ = Parser::new(tokens).parse();
}

// ============================================================================
// Front end
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let code = "func f(a, b) ret a * b + 1 end\n".repeat(200);
    c.bench_function("parse_200_functions", |b| {
        b.iter(|| parse_only(black_box(&code)));
    });
}

// ============================================================================
// Basic Execution Benchmarks
// ============================================================================

fn bench_interp_arithmetic_loop(c: &mut Criterion) {
    c.bench_function("interp_arithmetic_loop_10k", |b| {
        let code = "sum := 0 i := 0 while i < 10000 do sum := sum + i i := i + 1 end print sum";
        b.iter(|| interp_run(black_box(code)));
    });
}

fn bench_interp_for_loop(c: &mut Criterion) {
    c.bench_function("interp_for_loop_10k", |b| {
        let code = "sum := 0 for i := 1, 10000 do sum := sum + i % 7 end print sum";
        b.iter(|| interp_run(black_box(code)));
    });
}

fn bench_interp_string_concat(c: &mut Criterion) {
    c.bench_function("interp_string_concat_500", |b| {
        let code = "s := '' for i := 1, 500 do s := s + 'x' end print s";
        b.iter(|| interp_run(black_box(code)));
    });
}

// ============================================================================
// Scope Depth Benchmarks
// ============================================================================

fn bench_interp_scope_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("interp_scope_depth");

    group.bench_function("depth_1", |b| {
        let code = "sum := 0 for i := 1, 1000 do local x := i sum := sum + x end";
        b.iter(|| interp_run(black_box(code)));
    });

    group.bench_function("depth_3", |b| {
        let code = r#"
            sum := 0
            for i := 1, 1000 do
                local a := i
                if true then
                    local b := a
                    if true then
                        sum := sum + b
                    end
                end
            end
        "#;
        b.iter(|| interp_run(black_box(code)));
    });

    group.finish();
}

// ============================================================================
// Recursion Benchmarks
// ============================================================================

fn bench_interp_recursion(c: &mut Criterion) {
    let mut group = c.benchmark_group("interp_recursion");

    for depth in [10, 15, 20].iter() {
        group.bench_with_input(BenchmarkId::new("fibonacci", depth), depth, |b, &d| {
            let code = format!(
                "func fib(n) if n <= 1 then ret n end ret fib(n - 1) + fib(n - 2) end print fib({})",
                d
            );
            b.iter(|| interp_run(black_box(&code)));
        });
    }

    group.bench_function("empty_fn_10k", |b| {
        let code = "func noop() end for i := 1, 10000 do noop() end";
        b.iter(|| interp_run(black_box(code)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_interp_arithmetic_loop,
    bench_interp_for_loop,
    bench_interp_string_concat,
    bench_interp_scope_depth,
    bench_interp_recursion
);
criterion_main!(benches);
