//! Aesthetics - decoration engine for game-launcher SD cards
//!
//! Discovers the wallpapers and icons decorating a card, groups them for
//! browsing, and moves them between the card and flat theme packages.
//!
//! - [`aggregation`] groups discovered decorations by console and by directory
//! - [`catalog`] reports which component categories a card or package provides
//! - [`codec`] maps live paths to package file names and back
//! - [`transfer`] saves, applies and resets decorations
//! - [`themes`] manages the saved theme library

pub mod aggregation;
pub mod catalog;
pub mod classifier;
pub mod codec;
pub mod config;
pub mod decoration;
pub mod error;
pub mod fs;
pub mod layout;
pub mod logging;
pub mod themes;
pub mod transfer;

#[cfg(test)]
pub mod test_fixtures;

pub use error::{AestheticsError, Result};
