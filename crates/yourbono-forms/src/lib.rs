//! # YourBono Forms
//!
//! Client-side input handling for the YourBono bond platform.
//!
//! - **Bond input**: [`BondInputValidator`](bond::BondInputValidator) runs the
//!   field validator, the business-rule warnings and the submission
//!   normalizer; [`BondForm`](bond::BondForm) drives them through the
//!   form's submit lifecycle
//! - **Sign-in and profile**: credential and username checks
//! - **Listing**: paging and display formatting for stored bonds
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use yourbono_forms::prelude::*;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let mut form = BondForm::new(7, today);
//! form.update(FieldUpdate::Name("Bono A".into()));
//! form.update(FieldUpdate::NominalValue(dec!(1000)));
//! form.update(FieldUpdate::MarketValue(dec!(950)));
//! form.update(FieldUpdate::InterestRate(dec!(8)));
//!
//! let payload = form.begin_submit(today).unwrap();
//! assert_eq!(payload.interest_rate, dec!(0.08));
//! assert_eq!(payload.emission_date, "2025-01-01T00:00:00.000Z");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod bond;
pub mod display;
pub mod error;
pub mod listing;
pub mod profile;
pub mod sign_in;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{
        normalize, BondForm, BondInputValidator, BusinessWarning, FieldErrors, FormOutcome,
        FormState, PreparedSubmission, ValidationReport, WarningKind,
    };
    pub use crate::error::{NormalizationError, SubmitRejection};
    pub use crate::listing::{paginate, Page, DEFAULT_PAGE_SIZE};
    pub use crate::profile::UsernameUpdate;
    pub use crate::sign_in::{SignInField, SignInForm};
    pub use yourbono_core::prelude::*;
}

pub use bond::{BondForm, BondInputValidator, ValidationReport};
pub use error::{NormalizationError, SubmitRejection};
