//! Subscription plans and feature gating for CRMPro.
//!
//! A static table of four plans (`basic`, `master`, `gold`, `enterprise`)
//! and pure functions that turn (plan, feature) into an access decision or
//! a quota. Price identifiers are configuration data only; nothing here
//! talks to a payment provider.

mod comparison;
mod error;
mod feature;
mod gate;
mod plan;

pub use comparison::{comparison_table, ComparisonCategory, ComparisonRow};
pub use error::{PlanError, PlanResult};
pub use feature::{Feature, FeatureValue, Limit, QuotaFeature};
pub use gate::{
    can_access_feature, check_feature, get_feature_limit, get_user_plan, has_feature,
    has_reached_limit, FeatureAccess,
};
pub use plan::{pricing_plans, BillingInterval, PlanFeatures, PlanType, PricingPlan, SupportTier};
