//! Kontext: named connection contexts for container backends
//!
//! A context is a persisted, named record describing how to reach one backend
//! (a Kubernetes cluster, Amazon ECS, or the local engine). This crate holds the
//! creation protocol, the registry implementations that store contexts, and the
//! thin CLI on top.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod registry;
