//! # fb-core
//!
//! Core types and error types for fbdesk.
//!
//! This crate provides the foundational types shared across all fbdesk crates:
//! - The feedback record entity
//! - The category model (three canonical values plus an open `Other` case)
//! - Submission validation for new feedback
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod submission;
