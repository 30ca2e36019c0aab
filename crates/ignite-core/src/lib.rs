//! # ignite-core
//!
//! Core types, progression rules, and error types for Ignite.
//!
//! This crate provides the foundational types shared across all Ignite crates:
//! - Entity structs for startups, milestones, deliverables, and their children
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - The `Actor` identity passed into every operation
//! - The permission policy gating every mutation
//! - Pure progression rules (lock state, status projection, progress rollup)
//! - Business error types
//! - Audit detail sub-types and response snapshots

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod policy;
pub mod progression;
pub mod responses;
