//! Buyer dashboard: the signed-in buyer's orders and summary statistics.
//!
//! Store failures are swallowed after logging; the dashboard then shows zero
//! orders instead of an error.

use tracing::{error, info};

use crate::{
    format,
    model::{Identity, OrderRecord, OrderStatus},
    store::OrderStore,
};

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_SECTION: &str = "products";

/// Result of mounting the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// No one is signed in; navigate here and render nothing.
    Redirect(&'static str),
    Loaded,
}

/// Figures shown in the stats cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedStats {
    pub pending_orders: usize,
    pub total_orders: usize,
    pub total_spent: f64,
}

impl DerivedStats {
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        Self {
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            total_orders: orders.len(),
            // An empty f64 sum is -0.0, which would print as `₹-0`.
            total_spent: orders.iter().fold(0.0, |acc, o| acc + o.total_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsCard {
    pub title: &'static str,
    pub value: String,
}

/// Content area selected by the sub-path under the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Redirect(&'static str),
    Products { buyer: &'a Identity },
    Orders { orders: &'a [OrderRecord] },
    Nothing,
}

impl<'a> Section<'a> {
    pub fn select(sub_path: &str, buyer: &'a Identity, orders: &'a [OrderRecord]) -> Self {
        match sub_path.trim_matches('/') {
            "" => Self::Redirect(DEFAULT_SECTION),
            "products" => Self::Products { buyer },
            "orders" => Self::Orders { orders },
            _ => Self::Nothing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub greeting: String,
    pub tagline: &'static str,
    pub loading: bool,
    pub cards: [StatsCard; 3],
    pub section: Section<'a>,
}

/// Clears the flag it points at when dropped.
struct ClearOnDrop<'a>(&'a mut bool);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone)]
pub struct BuyerDashboard {
    orders: Vec<OrderRecord>,
    loading: bool,
}

impl Default for BuyerDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl BuyerDashboard {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            loading: true,
        }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load the buyer's orders once.
    pub async fn mount<S>(&mut self, store: &S, identity: Option<&Identity>) -> Mount
    where
        S: OrderStore + ?Sized,
    {
        let Some(identity) = identity else {
            info!("no signed-in buyer, redirecting to {LOGIN_PATH}");
            return Mount::Redirect(LOGIN_PATH);
        };

        let _settled = ClearOnDrop(&mut self.loading);

        match store.orders_for_buyer(&identity.id).await {
            Ok(orders) => {
                info!(buyer = %identity.id, count = orders.len(), "loaded orders");
                self.orders = orders;
            }
            Err(err) => {
                error!(buyer = %identity.id, error = %err, "Failed to load orders");
                self.orders.clear();
            }
        }

        Mount::Loaded
    }

    pub fn stats(&self) -> DerivedStats {
        DerivedStats::from_orders(&self.orders)
    }

    pub fn view<'a>(&'a self, identity: &'a Identity, sub_path: &str) -> DashboardView<'a> {
        let stats = self.stats();

        DashboardView {
            greeting: format!("Welcome, {}", identity.name),
            tagline: "Browse and purchase fresh produce",
            loading: self.loading,
            cards: [
                StatsCard {
                    title: "Pending Orders",
                    value: stats.pending_orders.to_string(),
                },
                StatsCard {
                    title: "Total Orders",
                    value: stats.total_orders.to_string(),
                },
                StatsCard {
                    title: "Total Spent",
                    value: format::rupees(stats.total_spent),
                },
            ],
            section: Section::select(sub_path, identity, &self.orders),
        }
    }
}
