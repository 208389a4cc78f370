pub mod customers;
pub mod orders;
pub mod products;
pub mod revenue;

pub use customers::CustomerDirectory;
pub use orders::OrderLedger;
pub use products::ProductStore;
pub use revenue::RevenueAggregator;
