//! Tiny Suitcase site: catalog endpoint, brochure pages and the decorative
//! photo wall that rotates catalog images across the landing view.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod pages;
pub mod rotation;
pub mod server;
pub mod ticker;

#[cfg(feature = "viewer")]
pub mod wall;
