//! Access decisions over the plan table.

use crate::feature::{Feature, FeatureValue, Limit, QuotaFeature};
use crate::plan::{PlanType, PricingPlan};
use serde::Serialize;

/// True only when the plan sets `feature` to boolean `true`.
pub fn has_feature(plan: PlanType, feature: Feature) -> bool {
    matches!(
        PricingPlan::get(plan).features.value(feature),
        FeatureValue::Bool(true)
    )
}

/// The plan for a user, falling back to `basic` when none is recorded.
pub fn get_user_plan(plan: Option<PlanType>) -> &'static PricingPlan {
    PricingPlan::get(plan.unwrap_or_default())
}

/// Whether `plan` grants `feature`.
///
/// Booleans are returned as-is, numeric quotas are accessible unless exactly
/// zero (so the `-1` unlimited sentinel is accessible), and any other value,
/// including flags a plan does not define, is accessible. Use [`has_feature`]
/// for a strict boolean check.
pub fn can_access_feature(plan: PlanType, feature: Feature) -> bool {
    match PricingPlan::get(plan).features.value(feature) {
        FeatureValue::Bool(enabled) => enabled,
        FeatureValue::Number(n) => n != 0,
        FeatureValue::Text(_) | FeatureValue::Absent => true,
    }
}

/// Resolved quota for `feature` on `plan`.
pub fn get_feature_limit(plan: PlanType, feature: QuotaFeature) -> Limit {
    let features = &PricingPlan::get(plan).features;
    let raw = match feature {
        QuotaFeature::MaxUsers => features.max_users,
        QuotaFeature::MaxClients => features.max_clients,
        QuotaFeature::MaxProjects => features.max_projects,
    };
    Limit::from_raw(raw)
}

/// True if `current_count` has reached the plan's quota.
pub fn has_reached_limit(plan: PlanType, feature: QuotaFeature, current_count: u64) -> bool {
    get_feature_limit(plan, feature).is_reached_by(current_count)
}

/// Outcome of guarding a feature behind a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeatureAccess {
    Granted,
    Locked {
        feature: Feature,
        feature_name: &'static str,
        plan: PlanType,
    },
}

impl FeatureAccess {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Guard decision for `feature` on `plan`, with the display name of a locked feature.
pub fn check_feature(plan: PlanType, feature: Feature) -> FeatureAccess {
    if can_access_feature(plan, feature) {
        FeatureAccess::Granted
    } else {
        FeatureAccess::Locked {
            feature,
            feature_name: feature.display_name(),
            plan,
        }
    }
}
