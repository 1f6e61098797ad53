//! In-memory registries for the Semnet case-frame model
//!
//! This crate provides in-memory implementations of the relation provider
//! and frame registry interfaces consumed by semnet-core. It is primarily
//! useful for tests, tooling and networks that live for one process.

pub mod frames;
pub use frames::InMemoryFrameRegistry;

pub mod relations;
pub use relations::InMemoryRelationRegistry;

use semnet_core::{
    CaseFrameResult, CatalogConfig, CatalogContext, ConstraintCatalogCell, StandardCatalogBuilder,
    StandardFrames,
};
use std::sync::Arc;

/// Relation and frame registries sharing one lifetime, plus the constraint
/// catalog every builder over them reuses
#[derive(Debug, Clone)]
pub struct InMemoryNetwork {
    relations: Arc<InMemoryRelationRegistry>,
    frames: Arc<InMemoryFrameRegistry>,
    constraints: Arc<ConstraintCatalogCell>,
}

impl InMemoryNetwork {
    /// Registries with every standard relation defined and no frames
    pub fn new() -> Self {
        Self {
            relations: Arc::new(InMemoryRelationRegistry::with_standard_relations()),
            frames: Arc::new(InMemoryFrameRegistry::new()),
            constraints: Arc::new(ConstraintCatalogCell::new()),
        }
    }

    /// The relation registry
    pub fn relations(&self) -> &Arc<InMemoryRelationRegistry> {
        &self.relations
    }

    /// The frame registry
    pub fn frames(&self) -> &Arc<InMemoryFrameRegistry> {
        &self.frames
    }

    /// The constraint catalog shared by builders and bootstraps
    pub fn constraint_catalog(&self) -> &Arc<ConstraintCatalogCell> {
        &self.constraints
    }

    /// A catalog builder bound to these registries
    pub fn catalog_builder(&self, config: CatalogConfig) -> StandardCatalogBuilder {
        StandardCatalogBuilder::with_cell(
            self.relations.clone(),
            self.frames.clone(),
            config,
            self.constraints.clone(),
        )
    }

    /// Build the standard frames into this network
    pub fn build_standard_frames(&self) -> CaseFrameResult<StandardFrames> {
        self.catalog_builder(CatalogConfig::default()).build()
    }

    /// Bootstrap a catalog context over these registries
    pub fn bootstrap(&self, config: CatalogConfig) -> anyhow::Result<CatalogContext> {
        CatalogContext::bootstrap_with_cell(
            config,
            self.relations.clone(),
            self.frames.clone(),
            self.constraints.clone(),
        )
    }
}

impl Default for InMemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}
