//! Context domain: record model, backend resolution, and the creation procedure.
//! Persistence is delegated to the registry port in `crate::registry`.

pub mod backend;
pub mod cancel;
pub mod commands;
pub mod create;
pub mod types;

pub use backend::{
    BackendOptions, EcsContextParams, KubeContextParams, LocalContextParams, ResolvedContext,
};
pub use cancel::CancelSignal;
pub use commands::{
    ContextCommandService, ContextCreateResult, ContextInspectResult, ContextListResult,
};
pub use create::create_context;
pub use types::{
    validate_name, ContextRecord, ContextType, EcsEndpoint, EndpointData, KubeEndpoint,
    LocalEndpoint,
};
