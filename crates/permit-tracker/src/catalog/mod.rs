//! Static reference data for the county's permitting authorities and permit types.

pub mod jurisdictions;
pub mod permit_types;

pub use jurisdictions::{
    jurisdiction_by_id, jurisdiction_by_name, jurisdictions, resolve_jurisdiction, Jurisdiction,
    ProcessingTimes,
};
pub use permit_types::{
    permit_type_by_id, permit_types, permit_types_by_category, PermitCategory, PermitFees,
    PermitType,
};
