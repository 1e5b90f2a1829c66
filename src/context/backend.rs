//! Backend parameter resolution.
//!
//! Each backend turns its transient creation parameters into the payload that
//! gets persisted. Resolution is pure data transformation: no network calls and
//! no credential lookups happen here.

use crate::context::types::{
    ContextType, EcsEndpoint, EndpointData, KubeEndpoint, LocalEndpoint,
};
use crate::error::ContextError;

/// Kubernetes creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeContextParams {
    pub description: String,
    pub endpoint: Option<String>,
    pub from_environment: bool,
}

impl Default for KubeContextParams {
    fn default() -> Self {
        Self {
            description: String::new(),
            endpoint: None,
            from_environment: true,
        }
    }
}

/// ECS creation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcsContextParams {
    pub description: String,
    pub profile: Option<String>,
    pub from_environment: bool,
}

/// Local engine creation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalContextParams {
    pub description: String,
}

/// Backend-specific options for context creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOptions {
    Kubernetes(KubeContextParams),
    Ecs(EcsContextParams),
    Local(LocalContextParams),
}

/// Output of resolution: what gets written to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub endpoint: EndpointData,
    pub description: String,
}

impl BackendOptions {
    pub fn context_type(&self) -> ContextType {
        match self {
            BackendOptions::Kubernetes(_) => ContextType::Kubernetes,
            BackendOptions::Ecs(_) => ContextType::Ecs,
            BackendOptions::Local(_) => ContextType::Local,
        }
    }

    /// Resolve options into the persisted payload and description.
    pub fn resolve(self) -> Result<ResolvedContext, ContextError> {
        match self {
            BackendOptions::Kubernetes(params) => Ok(resolve_kubernetes(params)),
            BackendOptions::Ecs(params) => resolve_ecs(params),
            BackendOptions::Local(params) => Ok(ResolvedContext {
                endpoint: EndpointData::Local(LocalEndpoint::default()),
                description: params.description,
            }),
        }
    }
}

/// An explicit endpoint outranks environment discovery. Without one, the
/// caller's `from_environment` choice is recorded as-is.
fn resolve_kubernetes(params: KubeContextParams) -> ResolvedContext {
    let endpoint = params.endpoint.unwrap_or_default();
    let from_environment = endpoint.is_empty() && params.from_environment;

    ResolvedContext {
        endpoint: EndpointData::Kubernetes(KubeEndpoint {
            endpoint,
            from_environment,
        }),
        description: params.description,
    }
}

fn resolve_ecs(params: EcsContextParams) -> Result<ResolvedContext, ContextError> {
    let profile = params.profile.filter(|p| !p.is_empty());
    let endpoint = match (profile, params.from_environment) {
        (Some(_), true) => {
            return Err(ContextError::BackendResolution {
                backend: ContextType::Ecs,
                message: "--profile and --from-env cannot be used together".to_string(),
            })
        }
        (None, false) => {
            return Err(ContextError::BackendResolution {
                backend: ContextType::Ecs,
                message: "one of --profile or --from-env is required".to_string(),
            })
        }
        (Some(profile), false) => EcsEndpoint {
            profile,
            credentials_from_env: false,
        },
        (None, true) => EcsEndpoint {
            profile: String::new(),
            credentials_from_env: true,
        },
    };

    Ok(ResolvedContext {
        endpoint: EndpointData::Ecs(endpoint),
        description: params.description,
    })
}
