//! Plan comparison matrix for pricing pages.

use crate::feature::{Feature, FeatureValue};
use crate::plan::{PlanType, PricingPlan};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCategory {
    pub category: &'static str,
    pub rows: Vec<ComparisonRow>,
}

/// One feature across every plan, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub feature: Feature,
    pub label: &'static str,
    pub cells: Vec<(PlanType, String)>,
}

const CATEGORIES: &[(&str, &[(Feature, &str)])] = &[
    (
        "Core",
        &[
            (Feature::MaxUsers, "Users"),
            (Feature::MaxClients, "Clients"),
            (Feature::MaxProjects, "Projects"),
            (Feature::MaxStorage, "Storage"),
        ],
    ),
    (
        "Modules",
        &[
            (Feature::Crm, "CRM"),
            (Feature::Projects, "Projects"),
            (Feature::Finance, "Finance"),
            (Feature::Analytics, "Analytics"),
        ],
    ),
    (
        "Advanced features",
        &[
            (Feature::Messaging, "Messaging"),
            (Feature::Calendar, "Calendar"),
            (Feature::Appointments, "Appointments"),
            (Feature::EmailIntegration, "Email integration"),
            (Feature::ApiAccess, "API access"),
            (Feature::CustomDomain, "Custom domain"),
        ],
    ),
    (
        "Support & infrastructure",
        &[
            (Feature::Support, "Support"),
            (Feature::Uptime, "Uptime"),
            (Feature::BackupFrequency, "Backups"),
        ],
    ),
];

fn format_cell(feature: Feature, value: FeatureValue) -> String {
    match value {
        FeatureValue::Number(-1) => "Unlimited".to_string(),
        FeatureValue::Number(n) => n.to_string(),
        FeatureValue::Bool(true) => "✓".to_string(),
        FeatureValue::Bool(false) | FeatureValue::Absent => "✗".to_string(),
        FeatureValue::Text(text) if feature == Feature::MaxStorage => {
            if text == "unlimited" {
                "Unlimited".to_string()
            } else {
                format!("{text} GB")
            }
        }
        FeatureValue::Text(text) => text,
    }
}

/// The comparison matrix, one row per feature with a cell per plan.
pub fn comparison_table() -> Vec<ComparisonCategory> {
    CATEGORIES
        .iter()
        .map(|&(category, features)| ComparisonCategory {
            category,
            rows: features
                .iter()
                .map(|&(feature, label)| ComparisonRow {
                    feature,
                    label,
                    cells: PlanType::ALL
                        .iter()
                        .map(|&plan| {
                            let value = PricingPlan::get(plan).features.value(feature);
                            (plan, format_cell(feature, value))
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
