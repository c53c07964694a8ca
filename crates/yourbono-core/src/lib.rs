//! # YourBono Core
//!
//! Domain types shared by every YourBono crate.
//!
//! - **Types**: [`BondDraft`](types::BondDraft) (the form record),
//!   [`BondPayload`](types::BondPayload) (the wire body),
//!   [`Bond`](types::Bond) (the stored record), and the small enumerations
//!   for currency, rate type and grace type
//! - **Field identifiers**: [`FieldId`](types::FieldId) keys every error and
//!   warning so maps are checked for exhaustiveness
//! - **Rounding**: the single tie-break rule used for payloads
//!
//! ## Example
//!
//! ```rust
//! use yourbono_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(round_currency(dec!(1000.005)), dec!(1000.01));
//! assert_eq!(percent_to_fraction(dec!(8)), dec!(0.08));
//! assert_eq!(CurrencyType::from_id(2).unwrap(), CurrencyType::USD);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_field_names)]

pub mod error;
pub mod rounding;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{YourBonoError, YourBonoResult};
    pub use crate::rounding::{fraction_to_percent, percent_to_fraction, round_currency};
    pub use crate::types::{
        Bond, BondDraft, BondPayload, CurrencyType, FieldId, FieldUpdate, GracePeriodType,
        InterestRateType,
    };
}

// Re-export commonly used types at crate root
pub use error::{YourBonoError, YourBonoResult};
pub use types::{Bond, BondDraft, BondPayload, FieldId, FieldUpdate};
