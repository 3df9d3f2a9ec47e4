use common::{PartId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Money, Part, PaymentMethod};
use gateway::{InMemoryInventoryGateway, InMemoryPaymentGateway};
use order_store::InMemoryOrderStore;
use orchestrator::OrderOrchestrator;

type BenchOrchestrator =
    OrderOrchestrator<InMemoryOrderStore, InMemoryInventoryGateway, InMemoryPaymentGateway>;

fn orchestrator_with_catalog(size: usize) -> BenchOrchestrator {
    let parts = (0..size).map(|i| {
        Part::new(
            format!("part-{i:03}"),
            format!("Part {i}"),
            Money::from_cents(100 * (i as i64 + 1)),
            1_000_000,
        )
    });
    OrderOrchestrator::new(
        InMemoryOrderStore::new(),
        InMemoryInventoryGateway::with_parts(parts),
        InMemoryPaymentGateway::new(),
    )
}

fn part_ids(count: usize) -> Vec<PartId> {
    (0..count).map(|i| PartId::new(format!("part-{i:03}"))).collect()
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = orchestrator_with_catalog(100);

    c.bench_function("orchestrator/create_order_3_parts", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator
                    .create_order(UserId::new("bench-user"), part_ids(3))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_create_order_50_parts(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = orchestrator_with_catalog(100);

    c.bench_function("orchestrator/create_order_50_parts", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator
                    .create_order(UserId::new("bench-user"), part_ids(50))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_full_lifecycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = orchestrator_with_catalog(10);

    c.bench_function("orchestrator/create_then_pay", |b| {
        b.iter(|| {
            rt.block_on(async {
                let created = orchestrator
                    .create_order(UserId::new("bench-user"), part_ids(2))
                    .await
                    .unwrap();
                orchestrator
                    .pay_order(&created.order_id, PaymentMethod::Card)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = orchestrator_with_catalog(10);

    // 1000 orders in the store
    let order_id = rt.block_on(async {
        let mut last = None;
        for _ in 0..1000 {
            let created = orchestrator
                .create_order(UserId::new("bench-user"), part_ids(1))
                .await
                .unwrap();
            last = Some(created.order_id);
        }
        last.unwrap()
    });

    c.bench_function("orchestrator/get_order_1000_stored", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator.get_order(&order_id).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_create_order_50_parts,
    bench_full_lifecycle,
    bench_get_order,
);
criterion_main!(benches);
