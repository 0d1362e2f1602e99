//! Household input model and form sanitization

mod data;
pub mod sanitize;

pub use data::{HouseholdInput, PersonInput, PersonRole, ReturnType, SpouseRangeCheck};
pub use sanitize::{RawDependent, RawHouseholdForm};
