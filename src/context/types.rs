//! Context record model: backend tags, persisted endpoint payloads, and name rules.

use crate::error::ContextError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend a context points at. The set is fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    Kubernetes,
    Ecs,
    Local,
}

impl ContextType {
    /// All backends, in registration and help order.
    pub const ALL: [ContextType; 3] = [ContextType::Kubernetes, ContextType::Ecs, ContextType::Local];

    pub fn slug(self) -> &'static str {
        match self {
            ContextType::Kubernetes => "kubernetes",
            ContextType::Ecs => "ecs",
            ContextType::Local => "local",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == value)
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Kubernetes payload. An empty endpoint means the client discovers the
/// API server from the ambient environment at connection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubeEndpoint {
    pub endpoint: String,
    pub from_environment: bool,
}

/// ECS payload: a named credentials profile, or credentials taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsEndpoint {
    pub profile: String,
    pub credentials_from_env: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEndpoint {}

/// Backend-specific payload persisted with a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointData {
    Kubernetes(KubeEndpoint),
    Ecs(EcsEndpoint),
    Local(LocalEndpoint),
}

impl EndpointData {
    pub fn context_type(&self) -> ContextType {
        match self {
            EndpointData::Kubernetes(_) => ContextType::Kubernetes,
            EndpointData::Ecs(_) => ContextType::Ecs,
            EndpointData::Local(_) => ContextType::Local,
        }
    }

    /// One-line endpoint description for listings
    pub fn summary(&self) -> String {
        match self {
            EndpointData::Kubernetes(kube) if !kube.endpoint.is_empty() => kube.endpoint.clone(),
            EndpointData::Kubernetes(kube) if kube.from_environment => {
                "(from environment)".to_string()
            }
            EndpointData::Kubernetes(_) => String::new(),
            EndpointData::Ecs(ecs) if ecs.credentials_from_env => {
                "(credentials from environment)".to_string()
            }
            EndpointData::Ecs(ecs) => format!("profile {}", ecs.profile),
            EndpointData::Local(_) => String::new(),
        }
    }
}

/// A persisted context. The type tag always matches the payload variant.
///
/// Field order matters for the TOML encoding: the payload goes last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub name: String,
    pub context_type: ContextType,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub endpoint: EndpointData,
}

impl ContextRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>, endpoint: EndpointData) -> Self {
        Self {
            name: name.into(),
            context_type: endpoint.context_type(),
            description: description.into(),
            created_at: Utc::now(),
            endpoint,
        }
    }

    /// Check the tag/payload invariant on records read back from storage.
    pub fn is_consistent(&self) -> bool {
        self.context_type == self.endpoint.context_type()
    }
}

/// Reject names that cannot be shown or stored unambiguously.
pub fn validate_name(name: &str) -> Result<(), ContextError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.trim().is_empty() {
        Some("name cannot be blank")
    } else if name.chars().any(char::is_control) {
        Some("name cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ContextError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
