//! Context creation procedure.
//!
//! 1. validate the name shape
//! 2. advisory existence check against the registry
//! 3. resolve backend options into a payload
//! 4. commit through the registry's atomic create
//!
//! Step 2 only exists to fail fast with a friendly error; the registry's
//! create is what guarantees uniqueness. Nothing is locked between steps.

use crate::context::backend::BackendOptions;
use crate::context::cancel::CancelSignal;
use crate::context::types::{validate_name, ContextRecord};
use crate::error::ContextError;
use crate::registry::ContextRegistry;
use tracing::{debug, info};

/// Create a named context. Returns the committed record.
pub fn create_context(
    registry: &dyn ContextRegistry,
    name: &str,
    options: BackendOptions,
    cancel: &CancelSignal,
) -> Result<ContextRecord, ContextError> {
    validate_name(name)?;

    let backend = options.context_type();
    if registry
        .exists(name)
        .map_err(|e| ContextError::from_registry(name, e))?
    {
        debug!(context = name, "Context name already registered");
        return Err(ContextError::AlreadyExists(name.to_string()));
    }

    let resolved = options.resolve()?;
    let record = ContextRecord::new(name, resolved.description, resolved.endpoint);

    // Last point at which cancellation can still leave the registry untouched
    if cancel.is_cancelled() {
        return Err(ContextError::Cancelled(name.to_string()));
    }

    registry
        .create(&record)
        .map_err(|e| ContextError::from_registry(name, e))?;

    info!(context = name, backend = %backend, "Context created");
    Ok(record)
}
