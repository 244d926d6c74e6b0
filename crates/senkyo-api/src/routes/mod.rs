//! # Route Modules
//!
//! - `pages`: the single HTML page route, `GET /`, whose screen is chosen
//!   by query state.
//! - `candidates`: JSON candidate list, detail, stance table and legend.
//! - `compare`: JSON comparison table.

pub mod candidates;
pub mod compare;
pub mod pages;
