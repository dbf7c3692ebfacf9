//! File I/O for example documents.
//!
//! This module provides functionality to load example documents from disk
//! or stdin.

pub mod loader;
