//! Feature keys and their values.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every key a plan's feature set can be queried by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    MaxUsers,
    MaxClients,
    MaxProjects,
    MaxStorage,
    Crm,
    Projects,
    Finance,
    Analytics,
    Messaging,
    Calendar,
    Appointments,
    PersonalManagement,
    EmailIntegration,
    ApiAccess,
    CustomDomain,
    WhiteLabel,
    Support,
    BackupFrequency,
    Uptime,
    DedicatedServer,
    FullArchitecture,
    OnPremiseOption,
    CustomBranding,
    AdvancedSecurity,
    Sla,
}

impl Feature {
    pub const ALL: [Feature; 25] = [
        Self::MaxUsers,
        Self::MaxClients,
        Self::MaxProjects,
        Self::MaxStorage,
        Self::Crm,
        Self::Projects,
        Self::Finance,
        Self::Analytics,
        Self::Messaging,
        Self::Calendar,
        Self::Appointments,
        Self::PersonalManagement,
        Self::EmailIntegration,
        Self::ApiAccess,
        Self::CustomDomain,
        Self::WhiteLabel,
        Self::Support,
        Self::BackupFrequency,
        Self::Uptime,
        Self::DedicatedServer,
        Self::FullArchitecture,
        Self::OnPremiseOption,
        Self::CustomBranding,
        Self::AdvancedSecurity,
        Self::Sla,
    ];

    /// Wire name, as used in the plan configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxUsers => "maxUsers",
            Self::MaxClients => "maxClients",
            Self::MaxProjects => "maxProjects",
            Self::MaxStorage => "maxStorage",
            Self::Crm => "crm",
            Self::Projects => "projects",
            Self::Finance => "finance",
            Self::Analytics => "analytics",
            Self::Messaging => "messaging",
            Self::Calendar => "calendar",
            Self::Appointments => "appointments",
            Self::PersonalManagement => "personalManagement",
            Self::EmailIntegration => "emailIntegration",
            Self::ApiAccess => "apiAccess",
            Self::CustomDomain => "customDomain",
            Self::WhiteLabel => "whiteLabel",
            Self::Support => "support",
            Self::BackupFrequency => "backupFrequency",
            Self::Uptime => "uptime",
            Self::DedicatedServer => "dedicatedServer",
            Self::FullArchitecture => "fullArchitecture",
            Self::OnPremiseOption => "onPremiseOption",
            Self::CustomBranding => "customBranding",
            Self::AdvancedSecurity => "advancedSecurity",
            Self::Sla => "sla",
        }
    }

    /// Human-readable name shown when a feature is locked.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Messaging => "Messaging",
            Self::Calendar => "Calendar",
            Self::Appointments => "Appointments",
            Self::Finance => "Finance module",
            Self::Analytics => "Analytics",
            Self::ApiAccess => "API access",
            Self::CustomDomain => "Custom domain",
            Self::WhiteLabel => "White label",
            other => other.as_str(),
        }
    }
}

impl FromStr for Feature {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| PlanError::UnknownFeature(s.to_string()))
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features that carry a numeric quota, where `-1` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotaFeature {
    MaxUsers,
    MaxClients,
    MaxProjects,
}

impl From<QuotaFeature> for Feature {
    fn from(quota: QuotaFeature) -> Self {
        match quota {
            QuotaFeature::MaxUsers => Feature::MaxUsers,
            QuotaFeature::MaxClients => Feature::MaxClients,
            QuotaFeature::MaxProjects => Feature::MaxProjects,
        }
    }
}

/// The value a plan assigns to a feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(i64),
    Text(String),
    /// The plan does not define the feature at all.
    Absent,
}

/// A resolved quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Limited(u64),
    Unlimited,
}

impl Limit {
    /// Resolve a raw configured quota. `-1` means unlimited; other negatives clamp to zero.
    pub fn from_raw(raw: i64) -> Self {
        if raw == -1 {
            Self::Unlimited
        } else {
            Self::Limited(raw.max(0) as u64)
        }
    }

    /// True if `current` has reached this limit.
    pub fn is_reached_by(&self, current: u64) -> bool {
        match self {
            Self::Limited(max) => current >= *max,
            Self::Unlimited => false,
        }
    }
}
