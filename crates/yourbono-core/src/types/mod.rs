//! Domain types for bonds and bond drafts.

mod bond;
mod currency;
mod draft;
mod field;
mod rate_kind;

pub use bond::{emission_timestamp, parse_emission_day, Bond, BondPayload, MIDNIGHT_UTC_SUFFIX};
pub use currency::CurrencyType;
pub use draft::{BondDraft, FieldUpdate};
pub use field::FieldId;
pub use rate_kind::{GracePeriodType, InterestRateType};
