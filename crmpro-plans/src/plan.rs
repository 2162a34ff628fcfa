//! The static plan table.

use crate::error::PlanError;
use crate::feature::{Feature, FeatureValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Subscription tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Basic,
    Master,
    Gold,
    Enterprise,
}

impl PlanType {
    pub const ALL: [PlanType; 4] = [Self::Basic, Self::Master, Self::Gold, Self::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Master => "master",
            Self::Gold => "gold",
            Self::Enterprise => "enterprise",
        }
    }
}

impl FromStr for PlanType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "master" => Ok(Self::Master),
            "gold" => Ok(Self::Gold),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(PlanError::UnknownPlan(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportTier {
    Email,
    Priority,
    #[serde(rename = "24/7")]
    AroundTheClock,
    Dedicated,
}

impl SupportTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Priority => "priority",
            Self::AroundTheClock => "24/7",
            Self::Dedicated => "dedicated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

/// Feature set of a plan. Quotas use `-1` for unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    pub max_users: i64,
    pub max_clients: i64,
    pub max_projects: i64,
    /// Gigabytes, or `"unlimited"`.
    pub max_storage: String,

    pub crm: bool,
    pub projects: bool,
    pub finance: bool,
    pub analytics: bool,

    pub messaging: bool,
    pub calendar: bool,
    pub appointments: bool,
    pub personal_management: bool,
    pub email_integration: bool,
    pub api_access: bool,
    pub custom_domain: bool,
    pub white_label: bool,

    pub support: SupportTier,
    pub backup_frequency: String,
    pub uptime: String,

    // enterprise only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_server: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_architecture: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_premise_option: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_branding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_security: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla: Option<bool>,
}

impl PlanFeatures {
    /// Value of `feature` in this feature set.
    pub fn value(&self, feature: Feature) -> FeatureValue {
        use FeatureValue::{Bool, Number, Text};
        let optional = |flag: Option<bool>| flag.map_or(FeatureValue::Absent, Bool);

        match feature {
            Feature::MaxUsers => Number(self.max_users),
            Feature::MaxClients => Number(self.max_clients),
            Feature::MaxProjects => Number(self.max_projects),
            Feature::MaxStorage => Text(self.max_storage.clone()),
            Feature::Crm => Bool(self.crm),
            Feature::Projects => Bool(self.projects),
            Feature::Finance => Bool(self.finance),
            Feature::Analytics => Bool(self.analytics),
            Feature::Messaging => Bool(self.messaging),
            Feature::Calendar => Bool(self.calendar),
            Feature::Appointments => Bool(self.appointments),
            Feature::PersonalManagement => Bool(self.personal_management),
            Feature::EmailIntegration => Bool(self.email_integration),
            Feature::ApiAccess => Bool(self.api_access),
            Feature::CustomDomain => Bool(self.custom_domain),
            Feature::WhiteLabel => Bool(self.white_label),
            Feature::Support => Text(self.support.as_str().to_string()),
            Feature::BackupFrequency => Text(self.backup_frequency.clone()),
            Feature::Uptime => Text(self.uptime.clone()),
            Feature::DedicatedServer => optional(self.dedicated_server),
            Feature::FullArchitecture => optional(self.full_architecture),
            Feature::OnPremiseOption => optional(self.on_premise_option),
            Feature::CustomBranding => optional(self.custom_branding),
            Feature::AdvancedSecurity => optional(self.advanced_security),
            Feature::Sla => optional(self.sla),
        }
    }
}

/// A purchasable plan. `price_id` is a payment-provider price identifier,
/// carried as configuration only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: PlanType,
    pub name: String,
    /// Whole US dollars per interval.
    pub price: u32,
    pub price_id: String,
    pub currency: String,
    pub interval: BillingInterval,
    pub description: String,
    pub popular: bool,
    pub features: PlanFeatures,
    pub restrictions: Vec<String>,
    pub benefits: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static PRICING_PLANS: LazyLock<[PricingPlan; 4]> = LazyLock::new(|| {
    [
        PricingPlan {
            id: PlanType::Basic,
            name: "Basic".into(),
            price: 2,
            price_id: "price_basic_monthly".into(),
            currency: "USD".into(),
            interval: BillingInterval::Month,
            description: "Essential navigation through the application".into(),
            popular: false,
            features: PlanFeatures {
                max_users: 1,
                max_clients: 50,
                max_projects: 5,
                max_storage: "1".into(),
                crm: true,
                projects: true,
                finance: false,
                analytics: false,
                messaging: false,
                calendar: false,
                appointments: false,
                personal_management: true,
                email_integration: false,
                api_access: false,
                custom_domain: false,
                white_label: false,
                support: SupportTier::Email,
                backup_frequency: "weekly".into(),
                uptime: "99%".into(),
                dedicated_server: None,
                full_architecture: None,
                on_premise_option: None,
                custom_branding: None,
                advanced_security: None,
                sla: None,
            },
            restrictions: strings(&[
                "Messaging disabled",
                "Calendar disabled",
                "Appointments disabled",
                "No email integration",
                "Email support only",
                "Storage limited to 1 GB",
            ]),
            benefits: strings(&[
                "Access to the full application",
                "Basic CRM",
                "Project management (max 5)",
                "Personal management",
                "Dashboards",
                "Email support",
            ]),
        },
        PricingPlan {
            id: PlanType::Master,
            name: "Master".into(),
            price: 15,
            price_id: "price_master_monthly".into(),
            currency: "USD".into(),
            interval: BillingInterval::Month,
            description: "Every feature unlocked".into(),
            popular: true,
            features: PlanFeatures {
                max_users: 5,
                max_clients: 500,
                max_projects: 50,
                max_storage: "50".into(),
                crm: true,
                projects: true,
                finance: true,
                analytics: true,
                messaging: true,
                calendar: true,
                appointments: true,
                personal_management: true,
                email_integration: true,
                api_access: false,
                custom_domain: false,
                white_label: false,
                support: SupportTier::Priority,
                backup_frequency: "daily".into(),
                uptime: "99.5%".into(),
                dedicated_server: None,
                full_architecture: None,
                on_premise_option: None,
                custom_branding: None,
                advanced_security: None,
                sla: None,
            },
            restrictions: strings(&[
                "No API access",
                "No custom domain",
                "Limited to 5 users",
            ]),
            benefits: strings(&[
                "Internal messaging",
                "Full calendar",
                "Appointment booking",
                "Finance management",
                "Advanced analytics",
                "Email integration",
                "50 GB storage",
                "Priority support",
                "Daily backups",
                "Unlimited projects",
            ]),
        },
        PricingPlan {
            id: PlanType::Gold,
            name: "Gold".into(),
            price: 49,
            price_id: "price_gold_monthly".into(),
            currency: "USD".into(),
            interval: BillingInterval::Month,
            description: "For professional teams".into(),
            popular: false,
            features: PlanFeatures {
                max_users: 25,
                max_clients: 5000,
                max_projects: 500,
                max_storage: "500".into(),
                crm: true,
                projects: true,
                finance: true,
                analytics: true,
                messaging: true,
                calendar: true,
                appointments: true,
                personal_management: true,
                email_integration: true,
                api_access: true,
                custom_domain: true,
                white_label: true,
                support: SupportTier::AroundTheClock,
                backup_frequency: "real-time".into(),
                uptime: "99.9%".into(),
                dedicated_server: None,
                full_architecture: None,
                on_premise_option: None,
                custom_branding: None,
                advanced_security: None,
                sla: None,
            },
            restrictions: strings(&["Shared infrastructure"]),
            benefits: strings(&[
                "Everything in Master",
                "Full API access",
                "Custom domain",
                "White label",
                "25 users",
                "500 GB storage",
                "24/7 support",
                "Real-time backups",
                "99.9% SLA",
                "Unlimited clients and projects",
            ]),
        },
        PricingPlan {
            id: PlanType::Enterprise,
            name: "Enterprise".into(),
            price: 299,
            price_id: "price_enterprise_monthly".into(),
            currency: "USD".into(),
            interval: BillingInterval::Month,
            description: "Complete turnkey solution".into(),
            popular: false,
            features: PlanFeatures {
                max_users: -1,
                max_clients: -1,
                max_projects: -1,
                max_storage: "unlimited".into(),
                crm: true,
                projects: true,
                finance: true,
                analytics: true,
                messaging: true,
                calendar: true,
                appointments: true,
                personal_management: true,
                email_integration: true,
                api_access: true,
                custom_domain: true,
                white_label: true,
                support: SupportTier::Dedicated,
                backup_frequency: "real-time + geo-redundant".into(),
                uptime: "99.99%".into(),
                dedicated_server: Some(true),
                full_architecture: Some(true),
                on_premise_option: Some(true),
                custom_branding: Some(true),
                advanced_security: Some(true),
                sla: Some(true),
            },
            restrictions: Vec::new(),
            benefits: strings(&[
                "Everything in Gold",
                "Dedicated server",
                "Domain name included",
                "Fully customised architecture",
                "On-server installation",
                "Custom branding",
                "Advanced security",
                "On-premise option",
                "Dedicated account manager",
                "Team training included",
                "Data migration",
                "99.99% SLA",
                "Unlimited users",
                "Unlimited storage",
                "Dedicated 24/7 support",
            ]),
        },
    ]
});

/// All plans, cheapest first.
pub fn pricing_plans() -> &'static [PricingPlan] {
    PRICING_PLANS.as_slice()
}

impl PricingPlan {
    /// The plan definition for `plan`.
    pub fn get(plan: PlanType) -> &'static PricingPlan {
        let idx = match plan {
            PlanType::Basic => 0,
            PlanType::Master => 1,
            PlanType::Gold => 2,
            PlanType::Enterprise => 3,
        };
        &PRICING_PLANS[idx]
    }
}
