//! The persisted document layout.

use crmpro_types::{Record, Session, User};
use serde::{Deserialize, Serialize};

/// The whole mock database: one JSON document under one storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub profile: Option<Record>,
    #[serde(default)]
    pub dashboard: Option<Record>,
    #[serde(default)]
    pub stats: Option<Record>,
    #[serde(default)]
    pub products: Vec<Record>,
    #[serde(default)]
    pub customers: Vec<Record>,
    #[serde(default)]
    pub deals: Vec<Record>,
    #[serde(default)]
    pub tasks: Vec<Record>,
    #[serde(default)]
    pub sales: Vec<Record>,
    #[serde(default)]
    pub recommendations: Vec<Record>,
}

/// Ordered record collections held in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Customers,
    Deals,
    Tasks,
    Sales,
    Recommendations,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Self::Products,
        Self::Customers,
        Self::Deals,
        Self::Tasks,
        Self::Sales,
        Self::Recommendations,
    ];

    /// Field name inside the document.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Deals => "deals",
            Self::Tasks => "tasks",
            Self::Sales => "sales",
            Self::Recommendations => "recommendations",
        }
    }
}

/// Per-user records held at most once in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    Profile,
    Dashboard,
    Stats,
}

impl StoreDocument {
    pub fn collection(&self, collection: Collection) -> &Vec<Record> {
        match collection {
            Collection::Products => &self.products,
            Collection::Customers => &self.customers,
            Collection::Deals => &self.deals,
            Collection::Tasks => &self.tasks,
            Collection::Sales => &self.sales,
            Collection::Recommendations => &self.recommendations,
        }
    }

    pub fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Products => &mut self.products,
            Collection::Customers => &mut self.customers,
            Collection::Deals => &mut self.deals,
            Collection::Tasks => &mut self.tasks,
            Collection::Sales => &mut self.sales,
            Collection::Recommendations => &mut self.recommendations,
        }
    }

    pub fn singleton(&self, singleton: Singleton) -> Option<&Record> {
        match singleton {
            Singleton::Profile => self.profile.as_ref(),
            Singleton::Dashboard => self.dashboard.as_ref(),
            Singleton::Stats => self.stats.as_ref(),
        }
    }

    pub fn singleton_mut(&mut self, singleton: Singleton) -> &mut Option<Record> {
        match singleton {
            Singleton::Profile => &mut self.profile,
            Singleton::Dashboard => &mut self.dashboard,
            Singleton::Stats => &mut self.stats,
        }
    }

    /// Drops the session and every per-user record in one transition.
    pub fn clear_identity(&mut self) {
        self.user = None;
        self.session = None;
        self.profile = None;
        self.dashboard = None;
        self.stats = None;
    }
}
