//! Bond-input validation and normalization.
//!
//! The pipeline has three independent stages:
//!
//! 1. [`validate_fields`]: blocking range and requiredness checks
//! 2. [`evaluate_warnings`]: non-blocking business rules
//! 3. [`normalize`]: conversion to the wire payload, with a post-condition
//!    check on the coupon rate
//!
//! [`BondInputValidator`] runs them together and [`BondForm`] wraps them in
//! the form's submit lifecycle.

mod fields;
mod form;
mod normalize;
pub mod rules;
mod validator;
mod warnings;

pub use fields::{validate_fields, FieldErrors};
pub use form::{BondForm, FormOutcome, FormState};
pub use normalize::normalize;
pub use validator::{BondInputValidator, PreparedSubmission, ValidationReport};
pub use warnings::{evaluate_warnings, BusinessWarning, WarningKind};
