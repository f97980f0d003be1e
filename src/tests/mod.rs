//! Crate-level test suites.
//!
//! Per-module unit tests live next to the code they cover; these suites
//! exercise the public API end to end and run property-based checks.

mod api_tests;
