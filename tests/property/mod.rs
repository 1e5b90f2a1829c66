//! Property-based tests for backend resolution and registry guarantees

mod precedence;
