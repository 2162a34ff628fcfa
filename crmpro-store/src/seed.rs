//! Fixture data written to a fresh (or corrupted) store.
//!
//! The demo identity is also what password sign-in binds to.

use crate::document::StoreDocument;
use chrono::{Days, NaiveDate};
use crmpro_types::{
    to_record, Customer, Dashboard, Deal, Product, Profile, Recommendation, Record, Sale, Stats,
    Task, User,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tracing::warn;

pub const DEMO_USER_ID: &str = "demo-user-001";
pub const DEMO_EMAIL: &str = "demo@crmpro.app";

const SEED_CREATED_AT: &str = "2024-01-15T09:00:00.000000Z";
const SALES_DAYS: u64 = 30;
const SALES_RNG_SEED: u64 = 0x5EED_CAFE;

pub fn demo_user() -> User {
    let mut metadata = serde_json::Map::new();
    metadata.insert("full_name".into(), json!("Demo User"));
    User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        user_metadata: metadata,
        created_at: SEED_CREATED_AT.to_string(),
    }
}

pub fn demo_profile() -> Profile {
    Profile {
        id: "demo-profile-001".into(),
        user_id: DEMO_USER_ID.into(),
        full_name: "Demo User".into(),
        email: DEMO_EMAIL.into(),
        avatar_url: None,
        company: Some("Cloud Industrie".into()),
        phone: Some("+33 1 23 45 67 89".into()),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn demo_dashboard() -> Dashboard {
    Dashboard {
        id: "demo-dashboard-001".into(),
        user_id: DEMO_USER_ID.into(),
        layout: json!({ "type": "default" }),
        widgets: vec!["stats".into(), "deals".into(), "tasks".into(), "sales".into()],
        theme: json!({ "mode": "dark" }),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn demo_stats() -> Stats {
    Stats {
        id: "demo-stats-001".into(),
        user_id: DEMO_USER_ID.into(),
        total_incidents: 3,
        ai_queries: 42,
        workflows_count: 7,
        digital_twins_count: 2,
        last_active: SEED_CREATED_AT.into(),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

fn product(id: &str, name: &str, category: &str, price: f64, stock: i64) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: Some(format!("{name} ({category})")),
        category: Some(category.into()),
        price,
        stock,
        sku: Some(format!("SKU-{}", id.trim_start_matches("prod-"))),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product("prod-1", "CRM Starter Pack", "software", 49.0, 120),
        product("prod-2", "Scheduling Module", "software", 29.0, 300),
        product("prod-3", "Analytics Add-on", "software", 79.0, 80),
        product("prod-4", "Onboarding Session", "service", 199.0, 15),
        product("prod-5", "Priority Support", "service", 99.0, 40),
    ]
}

fn customer(id: &str, name: &str, company: &str, status: &str, total_spent: f64) -> Customer {
    let handle = name.to_lowercase().replace(' ', ".");
    Customer {
        id: id.into(),
        name: name.into(),
        email: Some(format!("{handle}@example.com")),
        phone: None,
        company: Some(company.into()),
        status: Some(status.into()),
        total_spent,
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn customers() -> Vec<Customer> {
    vec![
        customer("cust-1", "Alice Martin", "Martin SARL", "active", 1250.0),
        customer("cust-2", "Bruno Petit", "Petit Logistique", "active", 860.5),
        customer("cust-3", "Chloe Bernard", "Clinique Bernard", "lead", 0.0),
        customer("cust-4", "David Leroy", "Leroy Conseil", "inactive", 320.0),
        customer("cust-5", "Emma Moreau", "Moreau & Fils", "active", 4100.0),
    ]
}

fn deal(id: &str, title: &str, customer_id: &str, value: f64, stage: &str, probability: i64) -> Deal {
    Deal {
        id: id.into(),
        title: title.into(),
        customer_id: Some(customer_id.into()),
        value,
        stage: stage.into(),
        probability,
        expected_close_date: Some("2024-03-31".into()),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn deals() -> Vec<Deal> {
    vec![
        deal("deal-1", "Annual licence renewal", "cust-1", 5400.0, "negotiation", 70),
        deal("deal-2", "Fleet scheduling rollout", "cust-2", 12000.0, "proposal", 45),
        deal("deal-3", "Clinic appointment system", "cust-3", 8000.0, "qualified", 30),
        deal("deal-4", "Consulting retainer", "cust-4", 2500.0, "lost", 0),
        deal("deal-5", "Analytics upgrade", "cust-5", 3900.0, "won", 100),
    ]
}

fn task(id: &str, title: &str, status: &str, priority: &str, due_date: &str) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: None,
        status: status.into(),
        priority: priority.into(),
        due_date: Some(due_date.into()),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn tasks() -> Vec<Task> {
    vec![
        task("task-1", "Call Alice about renewal", "todo", "high", "2024-02-01"),
        task("task-2", "Send proposal to Petit Logistique", "in_progress", "high", "2024-02-03"),
        task("task-3", "Demo for Clinique Bernard", "todo", "medium", "2024-02-10"),
        task("task-4", "Update pricing sheet", "done", "low", "2024-01-20"),
    ]
}

fn recommendation(id: &str, title: &str, description: &str, category: &str, priority: &str) -> Recommendation {
    Recommendation {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        priority: priority.into(),
        impact: Some("medium".into()),
        status: Some("pending".into()),
        created_at: SEED_CREATED_AT.into(),
        updated_at: SEED_CREATED_AT.into(),
    }
}

pub fn recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(
            "rec-1",
            "Follow up on stalled proposals",
            "Two deals have stayed in proposal for more than 14 days.",
            "sales",
            "high",
        ),
        recommendation(
            "rec-2",
            "Restock onboarding sessions",
            "Onboarding Session availability is below 20 slots.",
            "inventory",
            "medium",
        ),
        recommendation(
            "rec-3",
            "Re-engage inactive customers",
            "One customer has been inactive for 60 days.",
            "retention",
            "low",
        ),
    ]
}

/// Deterministic sales history covering the `SALES_DAYS` days up to `today`.
pub fn generate_sales(today: NaiveDate) -> Vec<Sale> {
    let mut rng = StdRng::seed_from_u64(SALES_RNG_SEED);
    let products = products();
    let customers = customers();
    let mut sales = Vec::new();

    for offset in (0..SALES_DAYS).rev() {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            continue;
        };
        let per_day = rng.gen_range(1..=3);
        for _ in 0..per_day {
            let product = &products[rng.gen_range(0..products.len())];
            let customer = &customers[rng.gen_range(0..customers.len())];
            let quantity = rng.gen_range(1..=5);
            let amount = (product.price * quantity as f64 * 100.0).round() / 100.0;
            let n = sales.len() + 1;
            sales.push(Sale {
                id: format!("sale-{n}"),
                product_id: Some(product.id.clone()),
                customer_id: Some(customer.id.clone()),
                amount,
                quantity,
                sale_date: day.format("%Y-%m-%d").to_string(),
                created_at: SEED_CREATED_AT.into(),
                updated_at: SEED_CREATED_AT.into(),
            });
        }
    }

    sales
}

fn records<T: serde::Serialize>(items: Vec<T>) -> Vec<Record> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match to_record(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping fixture that is not a JSON object");
                None
            }
        })
        .collect()
}

/// The document a fresh store starts from: fixtures, no identity.
pub fn default_document(today: NaiveDate) -> StoreDocument {
    StoreDocument {
        user: None,
        session: None,
        profile: None,
        dashboard: None,
        stats: None,
        products: records(products()),
        customers: records(customers()),
        deals: records(deals()),
        tasks: records(tasks()),
        sales: records(generate_sales(today)),
        recommendations: records(recommendations()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn sales_are_deterministic() {
        assert_eq!(generate_sales(today()), generate_sales(today()));
    }

    #[test]
    fn sales_cover_window() {
        let sales = generate_sales(today());
        let first = sales.first().unwrap();
        let last = sales.last().unwrap();
        assert_eq!(first.sale_date, "2025-06-01");
        assert_eq!(last.sale_date, "2025-06-30");
    }

    #[test]
    fn seed_ids_unique_per_collection() {
        let doc = default_document(today());
        for rows in [&doc.products, &doc.customers, &doc.deals, &doc.tasks, &doc.sales] {
            let ids: HashSet<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
            assert_eq!(ids.len(), rows.len());
        }
    }

    #[test]
    fn seed_has_no_identity() {
        let doc = default_document(today());
        assert!(doc.user.is_none());
        assert!(doc.session.is_none());
        assert!(doc.profile.is_none());
    }

    #[test]
    fn fixtures_all_become_records() {
        let doc = default_document(today());
        assert_eq!(doc.products.len(), products().len());
        assert_eq!(doc.customers.len(), customers().len());
        assert_eq!(doc.deals.len(), deals().len());
        assert_eq!(doc.tasks.len(), tasks().len());
        assert_eq!(doc.recommendations.len(), recommendations().len());
    }

    #[test]
    fn non_object_fixtures_are_skipped() {
        let rows = records(vec![json!({ "id": "a" }), json!(1), json!({ "id": "b" })]);
        let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
