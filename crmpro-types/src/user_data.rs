//! Per-user singleton records, created alongside the session.

use serde::{Deserialize, Serialize};

/// Display and contact attributes for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Dashboard preferences (`user_dashboards` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub user_id: String,
    pub layout: serde_json::Value,
    #[serde(default)]
    pub widgets: Vec<String>,
    pub theme: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Usage counters (`user_stats` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub total_incidents: i64,
    #[serde(default)]
    pub ai_queries: i64,
    #[serde(default)]
    pub workflows_count: i64,
    #[serde(default)]
    pub digital_twins_count: i64,
    pub last_active: String,
    pub created_at: String,
    pub updated_at: String,
}
