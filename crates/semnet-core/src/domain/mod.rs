/// Relation constraints and the standard constraint catalog
pub mod relation_constraint;

/// Case frames and canonical IDs
pub mod case_frame;

/// Priority-ordered signature collection
pub mod signatures;

/// Constrained case frames
pub mod constrained;

/// Frame registry interface
pub mod repository;
