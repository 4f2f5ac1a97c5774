//! Black-box checks against the reqres.in user, auth and resource endpoints.
//!
//! Each [`Case`] issues a single request and asserts on the status code and
//! body. Cases that mutate a user get their own through [`UserFixture`],
//! which deletes it again however the case ends.

pub mod cases;
pub mod check;
pub mod fixture;
pub mod runner;
pub mod telemetry;

pub use cases::{Case, CheckKind};
pub use check::CheckFailure;
pub use fixture::UserFixture;
pub use runner::{CaseOutcome, SuiteReport, run_all, run_cases};
