#![no_std]

//! Memarray Core - Element and Layout Definitions
//!
//! This crate provides the element type constraints, error taxonomy, and
//! pure layout arithmetic shared by memory-mapped array file implementations

pub mod element;
pub mod error;
pub mod layout;

pub use element::*;
pub use error::*;
pub use layout::*;
