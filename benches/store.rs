// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Benchmarks for the checkout simulator.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single register transaction processing
//! - Line selection across lanes
//! - Full store simulations at increasing shopper counts
//! - Independent store simulations in parallel

use checkout_sim::{
    Cashier, Configuration, GroceryItem, Register, RegisterId, Shopper, ShopperIdGenerator, Store,
    StoreConfig,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn grocery(index: usize) -> GroceryItem {
    GroceryItem::new(
        format!("item-{}", index % 7),
        Decimal::new(99 + (index as i64 % 50) * 10, 2),
        Decimal::new(index as i64 % 4, 0),
    )
}

/// Deterministic mix of small and large baskets arriving every other step.
fn make_shoppers(ids: &mut ShopperIdGenerator, count: usize) -> Vec<Shopper> {
    (0..count)
        .map(|i| {
            let items = if i % 3 == 0 { 30 } else { 1 + i % 12 };
            let groceries: Vec<_> = (0..items).map(|j| grocery(i + j)).collect();
            ids.create(&groceries, (i / 2) as u64)
        })
        .collect()
}

fn store_config() -> StoreConfig {
    StoreConfig {
        registers: 4,
        express_lines: 2,
        ..StoreConfig::default()
    }
}

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_single_register(c: &mut Criterion) {
    let mut ids = ShopperIdGenerator::new();
    let shoppers: Vec<_> = make_shoppers(&mut ids, 1_000)
        .into_iter()
        .map(Arc::new)
        .collect();

    c.bench_function("single_register_1000_shoppers", |b| {
        b.iter(|| {
            let cashier = Cashier::standard(5, Decimal::ZERO).unwrap();
            let mut register = Register::new(RegisterId(1), cashier);
            for shopper in &shoppers {
                register.process_shopper(Arc::clone(shopper)).unwrap();
            }
            black_box(register.running_cost())
        })
    });
}

fn bench_line_selection(c: &mut Criterion) {
    let mut ids = ShopperIdGenerator::new();
    let shoppers: Vec<_> = make_shoppers(&mut ids, 1_000)
        .into_iter()
        .map(Arc::new)
        .collect();

    c.bench_function("select_line_1000_shoppers", |b| {
        b.iter(|| {
            let lines = [
                Configuration::express_line(),
                Configuration::express_line(),
                Configuration::normal_line(),
            ];
            for shopper in &shoppers {
                Arc::clone(shopper).select_line(black_box(&lines)).unwrap();
            }
            black_box(lines[2].len())
        })
    });
}

fn bench_store_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_run");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let mut ids = ShopperIdGenerator::new();
                let shoppers = make_shoppers(&mut ids, count);
                let mut store = Store::from_config(&store_config()).unwrap();
                store.run(black_box(shoppers)).unwrap();
                black_box(store.total_cost())
            })
        });
    }

    group.finish();
}

// =============================================================================
// Multi-Threaded Benchmarks
// =============================================================================

fn bench_parallel_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_runs");

    for runs in [4, 16, 64].iter() {
        group.throughput(Throughput::Elements(*runs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(runs), runs, |b, &runs| {
            b.iter(|| {
                let costs: Vec<Decimal> = (0..runs)
                    .into_par_iter()
                    .map(|_| {
                        let mut ids = ShopperIdGenerator::new();
                        let shoppers = make_shoppers(&mut ids, 1_000);
                        let mut store = Store::from_config(&store_config()).unwrap();
                        store.run(shoppers).unwrap();
                        store.total_cost()
                    })
                    .collect();
                black_box(costs)
            })
        });
    }

    group.finish();
}

criterion_group!(
    single_threaded,
    bench_single_register,
    bench_line_selection,
    bench_store_run,
);

criterion_group!(multi_threaded, bench_parallel_runs,);

criterion_main!(single_threaded, multi_threaded);
