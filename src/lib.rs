//! Block Blast (workspace facade crate).
//!
//! Re-exports the workspace crates as `block_blast::{core,engine,input,term,types}`
//! and hosts the pieces shared by both front ends: configuration, high-score
//! persistence, logging setup and the line-protocol (headless) driver.

pub mod config;
pub mod headless;
pub mod high_score;
pub mod logging;

pub use block_blast_core as core;
pub use block_blast_engine as engine;
pub use block_blast_input as input;
pub use block_blast_term as term;
pub use block_blast_types as types;
