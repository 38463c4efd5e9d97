//! Unit tests - Pure tests of the graph model through the public API
//!
//! No database or server involved.

mod color_rules_tests;
