use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::CreateOrder;
use order_store::{InMemoryOrderStore, Order, OrderId, OrderStatus, OrderStore};

fn make_order(i: usize) -> Order {
    Order::new(
        OrderId::new(format!("ORD-{i:06}")),
        CreateOrder::new("cust-1", "rest-1", ["burger", "fries"]),
        Utc::now(),
    )
}

fn populated_store(rt: &tokio::runtime::Runtime, count: usize) -> InMemoryOrderStore {
    let store = InMemoryOrderStore::new();
    rt.block_on(async {
        for i in 0..count {
            store.save(make_order(i)).await;
        }
    });
    store
}

fn bench_save(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("order_store/save", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryOrderStore::new();
                store.save(make_order(1)).await;
            });
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated_store(&rt, 1_000);
    let id = OrderId::new("ORD-000500");

    c.bench_function("order_store/get_from_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.get(&id).await.unwrap();
            });
        });
    });
}

fn bench_update_status(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated_store(&rt, 1_000);
    let id = OrderId::new("ORD-000500");

    c.bench_function("order_store/update_status", |b| {
        b.iter(|| {
            rt.block_on(async {
                store
                    .update_status(&id, OrderStatus::Processing)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get_all(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated_store(&rt, 1_000);

    c.bench_function("order_store/get_all_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                let orders = store.get_all().await;
                assert_eq!(orders.len(), 1_000);
            });
        });
    });
}

criterion_group!(
    benches,
    bench_save,
    bench_get,
    bench_update_status,
    bench_get_all
);
criterion_main!(benches);
