//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod jira;
pub mod query;
pub mod search;
