//! Test helpers module
//!
//! This module provides utilities and helpers for testing the TalentGate
//! application: the mock SMS gateway, database setup and data builders.

pub mod database_helper;
pub mod sms_mock;
pub mod test_data;

pub use database_helper::*;
pub use sms_mock::*;
pub use test_data::*;
