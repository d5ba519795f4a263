//! Core of the datachore agent: instruction classification, the chore handlers
//! and the façade that ties them together.

pub mod agent;
pub mod api;
pub mod capability;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod util;
