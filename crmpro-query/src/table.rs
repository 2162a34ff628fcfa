//! Table names and where each table lives in the document.

use crate::error::UnknownTable;
use crmpro_store::{Collection, Singleton};
use std::str::FromStr;

/// A queryable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    UserDashboards,
    UserStats,
    Products,
    Customers,
    Deals,
    Tasks,
    Sales,
    AiRecommendations,
}

/// Storage shape of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Per-user record held at most once; identity is implicit.
    Singleton(Singleton),
    /// Ordered list of rows.
    Collection(Collection),
}

impl Table {
    pub const ALL: [Table; 9] = [
        Self::Profiles,
        Self::UserDashboards,
        Self::UserStats,
        Self::Products,
        Self::Customers,
        Self::Deals,
        Self::Tasks,
        Self::Sales,
        Self::AiRecommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::UserDashboards => "user_dashboards",
            Self::UserStats => "user_stats",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Deals => "deals",
            Self::Tasks => "tasks",
            Self::Sales => "sales",
            Self::AiRecommendations => "ai_recommendations",
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Self::Profiles => TableKind::Singleton(Singleton::Profile),
            Self::UserDashboards => TableKind::Singleton(Singleton::Dashboard),
            Self::UserStats => TableKind::Singleton(Singleton::Stats),
            Self::Products => TableKind::Collection(Collection::Products),
            Self::Customers => TableKind::Collection(Collection::Customers),
            Self::Deals => TableKind::Collection(Collection::Deals),
            Self::Tasks => TableKind::Collection(Collection::Tasks),
            Self::Sales => TableKind::Collection(Collection::Sales),
            Self::AiRecommendations => TableKind::Collection(Collection::Recommendations),
        }
    }
}

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for table in Table::ALL {
            assert_eq!(table.as_str().parse::<Table>().unwrap(), table);
        }
    }

    #[test]
    fn recommendations_table_maps_to_collection() {
        assert_eq!(
            Table::AiRecommendations.kind(),
            TableKind::Collection(Collection::Recommendations)
        );
        assert!("recommendations".parse::<Table>().is_err());
    }
}
