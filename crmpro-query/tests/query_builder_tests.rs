use crmpro_query::{QueryContext, ResponseError, Table};
use crmpro_store::{DocumentStore, MemoryBackend, StorageBackend, StoreDocument, StoreError, StoreResult};
use crmpro_types::{Clock, Customer, Record, Task};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

const OLD: &str = "2024-01-01T00:00:00.000000Z";

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

fn fixture() -> StoreDocument {
    StoreDocument {
        customers: vec![
            record(json!({ "id": "c1", "name": "A", "email": "a@x.com", "created_at": OLD, "updated_at": OLD })),
            record(json!({ "id": "c2", "name": "Z", "email": "z@x.com", "created_at": OLD, "updated_at": OLD })),
        ],
        products: vec![
            record(json!({ "id": "p1", "name": "b", "price": 10 })),
            record(json!({ "id": "p2", "name": "c", "price": 9 })),
            record(json!({ "id": "p3", "name": "a", "price": 100 })),
        ],
        tasks: vec![
            record(json!({ "id": "t1", "title": "old", "status": "done", "priority": "low", "created_at": OLD, "updated_at": OLD })),
        ],
        sales: vec![
            record(json!({ "id": "s1", "sale_date": "2025-05-31", "amount": 5 })),
            record(json!({ "id": "s2", "sale_date": "2025-06-01", "amount": 6 })),
            record(json!({ "id": "s3", "sale_date": "2025-06-15", "amount": 7 })),
            record(json!({ "id": "s4", "sale_date": "2025-06-30", "amount": 8 })),
            record(json!({ "id": "s5", "sale_date": "2025-07-01", "amount": 9 })),
        ],
        ..Default::default()
    }
}

fn ctx() -> QueryContext {
    let store = DocumentStore::with_seed(Arc::new(MemoryBackend::new()), "test", fixture);
    QueryContext::new(Arc::new(store), Arc::new(Clock::new()))
}

fn ids(rows: &[Record]) -> Vec<&str> {
    rows.iter().map(|r| r["id"].as_str().unwrap()).collect()
}

// ── Select ───────────────────────────────────────────────────────

#[tokio::test]
async fn select_all_keeps_collection_order() {
    let db = ctx();
    let rows = db.from("products").select("*").await.data.unwrap();
    assert_eq!(ids(&rows), vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn order_then_limit_sorts_before_truncating() {
    let db = ctx();
    let rows = db.from("products").select("*").order("name", true).limit(2).await.data.unwrap();
    assert_eq!(ids(&rows), vec!["p3", "p1"]);
}

#[tokio::test]
async fn order_is_by_string_value() {
    let db = ctx();
    let rows = db.from("products").select("*").order("price", false).await.data.unwrap();
    // "9" > "100" > "10" as strings
    assert_eq!(ids(&rows), vec!["p2", "p3", "p1"]);
}

#[tokio::test]
async fn range_filters_are_inclusive() {
    let db = ctx();
    let rows = db
        .from("sales")
        .select("*")
        .gte("sale_date", "2025-06-01")
        .lte("sale_date", "2025-06-30")
        .await
        .data
        .unwrap();
    assert_eq!(ids(&rows), vec!["s2", "s3", "s4"]);
}

#[tokio::test]
async fn range_window_after_sort() {
    let db = ctx();
    let rows = db.from("sales").select("id").order("sale_date", false).range(1, 2).await.data.unwrap();
    assert_eq!(ids(&rows), vec!["s4", "s3"]);
}

#[tokio::test]
async fn projection_keeps_requested_columns() {
    let db = ctx();
    let row = db.from("customers").select("id, name").eq("id", "c2").single().await.data.unwrap();
    assert_eq!(row, record(json!({ "id": "c2", "name": "Z" })));
}

#[tokio::test]
async fn single_miss_is_null_without_error() {
    let db = ctx();
    let response = db.from("customers").select("*").eq("id", "nope").maybe_single().await;
    assert_eq!(response.data, None);
    assert_eq!(response.error, None);
}

#[tokio::test]
async fn unknown_table_yields_empty_data() {
    let db = ctx();
    assert!(db.from("invoices").table().is_none());
    let rows = db.from("invoices").select("*").await;
    assert_eq!(rows.data, Some(vec![]));
    assert_eq!(rows.error, None);
    assert_eq!(db.from("invoices").select("*").single().await.data, None);
}

#[tokio::test]
async fn typed_decode() {
    let db = ctx();
    let response = db.from("customers").select("*").eq("id", "c1").single().await;
    let customer: Customer = response.decode().unwrap().unwrap();
    assert_eq!(customer.email.as_deref(), Some("a@x.com"));
}

// ── Insert ───────────────────────────────────────────────────────

#[tokio::test]
async fn inserted_task_comes_first_by_created_at_desc() {
    let db = ctx();
    let inserted = db
        .from("tasks")
        .insert(json!({ "id": "caller-id", "title": "Call back", "status": "todo", "priority": "high" }))
        .select()
        .single()
        .await
        .data
        .unwrap();
    assert_ne!(inserted["id"], "caller-id");
    assert_eq!(inserted["created_at"], inserted["updated_at"]);

    let newest = db.from("tasks").select("*").order("created_at", false).limit(1).single().await;
    let task: Task = newest.decode().unwrap().unwrap();
    assert_eq!(task.title, "Call back");
    assert_eq!(Value::String(task.id), inserted["id"]);
}

#[tokio::test]
async fn insert_many_keeps_every_record() {
    let db = ctx();
    let first = db
        .from("products")
        .insert(json!([{ "name": "x" }, { "name": "y" }]))
        .select()
        .single()
        .await
        .data
        .unwrap();
    assert_eq!(first["name"], "x");

    let rows = db.from("products").select("name").await.data.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["b", "c", "a", "x", "y"]);
}

#[tokio::test]
async fn plain_insert_resolves_without_data() {
    let db = ctx();
    let response = db.from("deals").insert(json!({ "title": "New" })).await;
    assert_eq!(response.data, None);
    assert_eq!(response.error, None);
    assert_eq!(db.from("deals").select("*").await.data.unwrap().len(), 1);
}

#[tokio::test]
async fn non_object_payload_is_rejected() {
    let db = ctx();
    let response = db.from("tasks").insert(json!(42)).await;
    assert!(matches!(response.error, Some(ResponseError::InvalidPayload(_))));
}

// ── Update ───────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_and_bumps_updated_at() {
    let db = ctx();
    let updated = db
        .from("customers")
        .update(json!({ "name": "B", "id": "hijack", "created_at": "1999-01-01T00:00:00Z" }))
        .eq("id", "c1")
        .select()
        .single()
        .await
        .data
        .unwrap();

    assert_eq!(updated["id"], "c1");
    assert_eq!(updated["name"], "B");
    assert_eq!(updated["email"], "a@x.com");
    assert_eq!(updated["created_at"], OLD);
    assert!(updated["updated_at"].as_str().unwrap() > OLD);

    let again = db
        .from("customers")
        .update(json!({ "name": "C" }))
        .eq("id", "c1")
        .select()
        .single()
        .await
        .data
        .unwrap();
    assert!(again["updated_at"].as_str().unwrap() > updated["updated_at"].as_str().unwrap());
}

#[tokio::test]
async fn update_touches_only_first_match() {
    let db = ctx();
    db.from("products").update(json!({ "stock": 0 })).lt("price", 50).await;
    let rows = db.from("products").select("*").eq("stock", 0).await.data.unwrap();
    assert_eq!(ids(&rows), vec!["p1"]);
}

#[tokio::test]
async fn update_miss_returns_null() {
    let db = ctx();
    let response = db.from("customers").update(json!({ "name": "B" })).eq("id", "none").select().single().await;
    assert_eq!(response.data, None);
    assert_eq!(response.error, None);
}

// ── Delete ───────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_matches_and_preserves_order() {
    let db = ctx();
    let removed = db.from("products").delete().eq("id", "p2").select().await.data.unwrap();
    assert_eq!(ids(&removed), vec!["p2"]);

    let rows = db.from("products").select("*").await.data.unwrap();
    assert_eq!(ids(&rows), vec!["p1", "p3"]);
}

#[tokio::test]
async fn delete_with_range_filter_removes_all_matches() {
    let db = ctx();
    db.from("sales").delete().lt("sale_date", "2025-06-15").await;
    let rows = db.from("sales").select("*").await.data.unwrap();
    assert_eq!(ids(&rows), vec!["s3", "s4", "s5"]);
}

// ── Numeric equality ─────────────────────────────────────────────

#[tokio::test]
async fn integer_literal_matches_seeded_float_price() {
    let db = QueryContext::new(Arc::new(DocumentStore::in_memory()), Arc::new(Clock::new()));

    let rows = db.from("products").select("*").eq("price", 49).await.data.unwrap();
    assert_eq!(ids(&rows), vec!["prod-1"]);

    let updated = db
        .from("products")
        .update(json!({ "stock": 7 }))
        .eq("price", 49)
        .select()
        .single()
        .await
        .data
        .unwrap();
    assert_eq!(updated["id"], "prod-1");
    assert_eq!(updated["stock"], 7);

    let removed = db.from("products").delete().eq("price", 49).select().await.data.unwrap();
    assert_eq!(ids(&removed), vec!["prod-1"]);
    let rest = db.from("products").select("*").neq("price", 49).await.data.unwrap();
    assert_eq!(rest.len(), 4);
}

// ── Singletons ───────────────────────────────────────────────────

#[tokio::test]
async fn singleton_select_ignores_filters() {
    let db = ctx();
    assert_eq!(db.from("profiles").select("*").single().await.data, None);

    db.store()
        .mutate(|doc| doc.profile = Some(record(json!({ "id": "pr1", "user_id": "u1", "full_name": "Ann" }))))
        .unwrap();
    let profile = db.from("profiles").select("*").eq("user_id", "someone-else").single().await;
    assert_eq!(profile.data.unwrap()["full_name"], "Ann");
}

#[tokio::test]
async fn singleton_update_is_unconditional() {
    let db = ctx();
    db.store()
        .mutate(|doc| doc.dashboard = Some(record(json!({ "id": "d1", "theme": { "mode": "dark" }, "updated_at": OLD }))))
        .unwrap();

    let updated = db
        .from(Table::UserDashboards.as_str())
        .update(json!({ "theme": { "mode": "light" } }))
        .eq("user_id", "whoever")
        .select()
        .single()
        .await
        .data
        .unwrap();
    assert_eq!(updated["theme"], json!({ "mode": "light" }));
    assert_eq!(updated["id"], "d1");
}

#[tokio::test]
async fn singleton_delete_and_profile_insert_are_ignored() {
    let db = ctx();
    db.store()
        .mutate(|doc| doc.profile = Some(record(json!({ "id": "pr1" }))))
        .unwrap();

    db.from("profiles").delete().eq("id", "pr1").await;
    db.from("profiles").insert(json!({ "full_name": "Other" })).await;
    let profile = db.from("profiles").select("*").single().await.data.unwrap();
    assert_eq!(profile, record(json!({ "id": "pr1" })));
}

#[tokio::test]
async fn stats_insert_replaces_singleton() {
    let db = ctx();
    db.from("user_stats").insert(json!({ "ai_queries": 1 })).await;
    let stats = db.from("user_stats").select("*").single().await.data.unwrap();
    assert_eq!(stats["ai_queries"], 1);
    assert!(stats.contains_key("id"));
}

// ── Functions ────────────────────────────────────────────────────

#[tokio::test]
async fn ai_recommendations_function_reads_store() {
    let db = ctx();
    db.store()
        .mutate(|doc| doc.recommendations = vec![record(json!({ "id": "r1" }))])
        .unwrap();
    let functions = crmpro_query::FunctionsClient::new(db.clone());

    let response = functions.invoke("ai-recommendations").await;
    assert_eq!(response.data, Some(json!({ "recommendations": [{ "id": "r1" }] })));
    assert_eq!(functions.invoke("send-email").await.data, None);
}

// ── Storage failure ──────────────────────────────────────────────

struct BrokenBackend;

impl StorageBackend for BrokenBackend {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }

    fn remove_item(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn backend_failure_surfaces_storage_error() {
    let store = DocumentStore::with_seed(Arc::new(BrokenBackend), "test", fixture);
    let db = QueryContext::new(Arc::new(store), Arc::new(Clock::new()));

    let response = db.from("products").select("*").await;
    assert_eq!(response.data, None);
    assert!(matches!(response.error, Some(ResponseError::Storage(_))));

    let inserted = db.from("products").insert(json!({ "name": "x" })).await;
    assert!(matches!(inserted.error, Some(ResponseError::Storage(_))));
}
