//! Graphlens - graph database results as colored visualization graphs
//!
//! This crate runs queries against a graph database and reshapes the returned
//! paths for a force-directed front-end:
//! - Node deduplication and link collection (`graph_model`)
//! - Rule-based node coloring from a schema document (`graph_catalog`)
//! - HTTP API and database client (`server`)

pub mod config;
pub mod graph_catalog;
pub mod graph_model;
pub mod server;
