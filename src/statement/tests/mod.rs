//! Unit tests for statement construction and rendering.
//!
//! File statements carry most of the rendering rules, so they get their own
//! submodule.
