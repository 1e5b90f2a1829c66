//! Configuration sources, in merge order: global file, explicit file, environment.

pub mod environment;
pub mod global_file;
