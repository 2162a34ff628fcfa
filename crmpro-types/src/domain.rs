//! Domain collection records.
//!
//! Optional columns default so that rows inserted with a partial shape still
//! decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sku: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_spent: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub value: f64,
    /// Pipeline stage: lead, qualified, proposal, negotiation, won, lost.
    pub stage: String,
    #[serde(default)]
    pub probability: i64,
    #[serde(default)]
    pub expected_close_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// todo, in_progress or done.
    pub status: String,
    /// low, medium or high.
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub quantity: i64,
    /// `YYYY-MM-DD`.
    pub sale_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// AI-generated suggestion (`ai_recommendations` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
