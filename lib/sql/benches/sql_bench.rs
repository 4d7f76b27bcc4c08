use criterion::{black_box, criterion_group, criterion_main, Criterion};

use carelog_sql::{SQLStore, SqliteStore, Value};

fn setup(rows: i64) -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .exec(
            "CREATE TABLE items (id TEXT PRIMARY KEY, data TEXT NOT NULL, category TEXT)",
            &[],
        )
        .unwrap();
    for i in 0..rows {
        store
            .exec(
                "INSERT INTO items (id, data, category) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(format!("item-{}", i)),
                    Value::Text(format!("{{\"name\":\"item {}\"}}", i)),
                    Value::Text(format!("cat-{}", i % 10)),
                ],
            )
            .unwrap();
    }
    store
}

fn bench_exec_insert(c: &mut Criterion) {
    let store = setup(0);
    let mut i = 0i64;
    c.bench_function("sqlite_insert_document", |b| {
        b.iter(|| {
            store
                .exec(
                    "INSERT INTO items (id, data, category) VALUES (?1, ?2, ?3)",
                    &[
                        Value::Text(format!("bench-{}", i)),
                        Value::Text("{\"name\":\"bench\"}".to_string()),
                        Value::Text("bench".to_string()),
                    ],
                )
                .unwrap();
            i += 1;
        });
    });
}

fn bench_query_by_id(c: &mut Criterion) {
    let store = setup(10_000);
    let mut i = 0i64;
    c.bench_function("sqlite_query_by_id", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT data FROM items WHERE id = ?1",
                    &[Value::Text(format!("item-{}", black_box(i % 10_000)))],
                )
                .unwrap();
            assert_eq!(rows.len(), 1);
            i += 1;
        });
    });
}

fn bench_query_by_category(c: &mut Criterion) {
    let store = setup(10_000);
    let mut i = 0i64;
    c.bench_function("sqlite_query_by_category_100", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT data FROM items WHERE category = ?1 LIMIT 100",
                    &[Value::Text(format!("cat-{}", black_box(i % 10)))],
                )
                .unwrap();
            assert_eq!(rows.len(), 100);
            i += 1;
        });
    });
}

criterion_group!(benches, bench_exec_insert, bench_query_by_id, bench_query_by_category);
criterion_main!(benches);
