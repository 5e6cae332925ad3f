//! Floornav Core Types and Definitions
//!
//! This crate provides the foundational types shared by the floornav
//! pipeline. It includes:
//!
//! - **Geometry**: exact-equality points, offsets and segments ([`geometry`] module)
//! - **Graph**: the navigation graph and its redundancy rule ([`graph`] module)
//! - **Rooms**: room annotations and their bound vertex ([`room`] module)

pub mod geometry;
pub mod graph;
pub mod room;
