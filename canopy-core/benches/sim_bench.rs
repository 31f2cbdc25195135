//! Criterion benchmarks for the engine hot paths.
//!
//! Benchmarks:
//! 1. Indicator precompute (single column and a typical mixed stack)
//! 2. Tree evaluation (wide and nested trees, per bar)
//! 3. Full pipeline (precompute + augment + simulate)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use canopy_core::domain::{Candle, NodeId};
use canopy_core::engine::{augment, precompute, simulate};
use canopy_core::eval::evaluate_group;
use canopy_core::strategy::{
    extract_indicators, Comparator, Condition, Group, IndicatorKind, IndicatorRef, LogicOp,
    Operand, Strategy, StrategyNode,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Candle {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000.0 + (i % 500_000) as f64,
                usd_inr: None,
            }
        })
        .collect()
}

fn condition(id: &str, left: IndicatorRef, comparator: Comparator, operand: Operand) -> StrategyNode {
    StrategyNode::Condition(Condition::new(NodeId::new(id), left, comparator, operand))
}

/// SMA(20) crossing SMA(50) entry, RSI(14) overbought exit.
fn crossover_strategy() -> Strategy {
    Strategy {
        asset: "BENCH".into(),
        entry_logic: Group::new(
            NodeId::new("entry"),
            LogicOp::And,
            vec![condition(
                "e1",
                IndicatorRef::with_period(IndicatorKind::Sma, 20),
                Comparator::CrossAbove,
                Operand::Indicator(IndicatorRef::with_period(IndicatorKind::Sma, 50)),
            )],
        ),
        exit_logic: Group::new(
            NodeId::new("exit"),
            LogicOp::And,
            vec![condition(
                "x1",
                IndicatorRef::with_period(IndicatorKind::Rsi, 14),
                Comparator::Gt,
                Operand::Value(70.0),
            )],
        ),
        stop_loss_pct: 5.0,
        take_profit_pct: 10.0,
    }
}

// ── 1. Indicator Precompute ──────────────────────────────────────────

fn bench_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("precompute");

    for &bar_count in &[252, 1260, 2520] {
        let candles = make_candles(bar_count);

        let sma_only = [IndicatorRef::with_period(IndicatorKind::Sma, 20)];
        group.bench_with_input(BenchmarkId::new("sma_20", bar_count), &bar_count, |b, _| {
            b.iter(|| precompute(black_box(&sma_only), black_box(&candles)));
        });

        // Typical mixed stack (windowed + weekly CPR)
        let full_stack = [
            IndicatorRef::with_period(IndicatorKind::Sma, 20),
            IndicatorRef::with_period(IndicatorKind::Ema, 50),
            IndicatorRef::with_period(IndicatorKind::Rsi, 14),
            IndicatorRef::with_period(IndicatorKind::Macd, 12),
            IndicatorRef::with_period(IndicatorKind::Atr, 14),
            IndicatorRef::with_period(IndicatorKind::BbUpper, 20),
            IndicatorRef::with_period(IndicatorKind::BbLower, 20),
            IndicatorRef::with_period(IndicatorKind::StochK, 14),
            IndicatorRef::new(IndicatorKind::CprPivot),
        ];
        group.bench_with_input(
            BenchmarkId::new("full_stack_9", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| precompute(black_box(&full_stack), black_box(&candles)));
            },
        );
    }

    group.finish();
}

// ── 2. Tree Evaluation ───────────────────────────────────────────────

fn bench_tree_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_eval");

    let candles = make_candles(1260);
    let strategy = crossover_strategy();
    let refs = extract_indicators(&strategy);
    let columns = precompute(&refs, &candles).unwrap();
    let series = augment(&candles, &columns).unwrap();

    group.bench_function("crossover_entry_1260_bars", |b| {
        b.iter(|| {
            for bar in 0..series.len() {
                black_box(evaluate_group(&series, &strategy.entry_logic, bar));
            }
        });
    });

    // Wide OR over 32 price thresholds, worst case no short-circuit.
    let wide = Group::new(
        NodeId::new("wide"),
        LogicOp::Or,
        (0..32)
            .map(|i| {
                condition(
                    &format!("w{i}"),
                    IndicatorRef::new(IndicatorKind::Price),
                    Comparator::Gt,
                    Operand::Value(1_000.0 + i as f64),
                )
            })
            .collect(),
    );
    group.bench_function("wide_or_32_1260_bars", |b| {
        b.iter(|| {
            for bar in 0..series.len() {
                black_box(evaluate_group(&series, &wide, bar));
            }
        });
    });

    group.finish();
}

// ── 3. Full Pipeline ─────────────────────────────────────────────────

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for &bar_count in &[252, 1260, 2520] {
        let candles = make_candles(bar_count);
        let strategy = crossover_strategy();

        group.bench_with_input(
            BenchmarkId::new("sma_crossover", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| {
                    let refs = extract_indicators(&strategy);
                    let columns = precompute(&refs, &candles).unwrap();
                    let series = augment(&candles, &columns).unwrap();
                    simulate(
                        black_box(&strategy),
                        black_box(&series),
                        100_000.0,
                        None,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_precompute, bench_tree_eval, bench_full_pipeline);
criterion_main!(benches);
