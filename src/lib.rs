//! MCP server for a tagged context knowledge store.
//!
//! Stores short documentation/code entries ("contexts") in a bounded
//! in-memory or persistent Redis backend and answers filtered,
//! relevance-ranked queries and similarity lookups over JSON-RPC 2.0 stdio,
//! compatible with any MCP-aware AI agent. Query ordering, similarity, and
//! re-ranking are deterministic: identical store contents and parameters
//! always produce identically ordered results.

pub mod config;
pub mod corpus;
pub mod handlers;
pub mod model;
pub mod protocol;
pub mod ranking;
pub mod server;
pub mod service;
pub mod store;

pub mod schema;
