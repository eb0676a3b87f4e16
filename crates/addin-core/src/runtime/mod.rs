//! Runtime detection and package installation
//!
//! This module provides:
//! - Node.js and npm detection
//! - Dependency installation for scaffolded projects

pub mod check;
pub mod installer;

pub use check::{check_node, check_npm, check_runtimes, RuntimeInfo};
pub use installer::{install_dependencies, open_node_docs};
