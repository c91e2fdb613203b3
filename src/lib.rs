//! player-rank crate
//!
//! This crate is an implementation detail of the `player-rank` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

#[doc(hidden)]
pub mod aggregate;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod preprocess;

#[doc(hidden)]
pub mod ranking;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod scoring;

#[doc(hidden)]
pub mod table;
