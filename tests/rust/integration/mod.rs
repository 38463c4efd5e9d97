//! Integration tests - HTTP API driven through the router with a mocked database
//!
//! These tests verify that the handlers, the query service and the graph model
//! work together, without a live database.

mod query_api_tests;
