//! Case-frame definition and constraint model
//!
//! Case frames describe the shape of a molecular node: the relations it
//! carries, a canonical ID derived from their names, per-relation constraints
//! and an ordered list of alternative signatures. The standard catalog
//! defines the well-known frames once per registry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
/// Domain model: constraints, frames, signatures and the registry interface
pub mod domain;
/// Error types for the case-frame model
pub mod error;

pub use catalog::{
    CatalogContext, StandardCatalogBuilder, StandardFrameKind, StandardFrames, ACT,
    CONTROL_ACTION, MAX_EXTRA_OBJECTS, PROPOSITION,
};
pub use config::CatalogConfig;
pub use domain::case_frame::{canonical_id, duplicate_names, CaseFrame, CaseFrameId, ID_DELIMITER};
pub use domain::constrained::ConstrainedCaseFrame;
pub use domain::relation_constraint::{
    standard_relation, ConstraintCatalogCell, RelationConstraint, RelationConstraintCatalog,
    StandardRelation, OBJECT_RELATIONS, STANDARD_RELATIONS,
};
pub use domain::repository::FrameRegistry;
pub use domain::signatures::{PrioritizedSignatures, SignatureRejection};
pub use error::{CaseFrameError, CaseFrameResult};

/// Install a global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this more
/// than once returns an error instead of panicking.
pub fn init_tracing(config: &CatalogConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if config.json_logs {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
    } else {
        builder
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
    }
}
