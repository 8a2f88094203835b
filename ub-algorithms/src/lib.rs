pub mod zoning;

pub use zoning::{run_zoning_ga, search_zoning, SearchOutcome};
