//! Rate tables and calculation policy configuration

mod table;
pub mod loader;
mod policy;

pub use loader::{find_region, load_rate_tables, load_rate_tables_from_reader};
pub use policy::{AllocationMethod, CalcPolicy, ReductionBasis};
pub use table::{CategoryRates, DependentEstimateRates, FlatPlanPrices, RateTable};
