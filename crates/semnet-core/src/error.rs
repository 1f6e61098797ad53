use semnet_interfaces::{InterfaceError, SignatureId};
use thiserror::Error;

use crate::domain::case_frame::CaseFrameId;

/// Result type for case-frame operations
pub type CaseFrameResult<T> = Result<T, CaseFrameError>;

/// Core error type for the case-frame model.
///
/// Variants split into soft outcomes, which leave state unchanged and are
/// meant for the immediate caller, and fatal ones, which abort bootstrap.
/// Use [`CaseFrameError::is_recoverable`] rather than matching by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseFrameError {
    /// A signature with the same ID is already attached to the frame
    #[error("Duplicate signature {signature} on case frame {frame}")]
    DuplicateSignature {
        /// Frame the signature was offered to
        frame: CaseFrameId,
        /// Offending signature ID
        signature: SignatureId,
    },

    /// The frame carries no signature with this ID
    #[error("Signature {signature} not found on case frame {frame}")]
    SignatureNotFound {
        /// Frame that was searched
        frame: CaseFrameId,
        /// Missing signature ID
        signature: SignatureId,
    },

    /// Requested priority lies past the end of the signature order
    #[error("Signature priority {priority} out of range for {len} signatures")]
    PriorityOutOfRange {
        /// Requested insertion position
        priority: usize,
        /// Number of signatures currently attached
        len: usize,
    },

    /// Standard relation constraints were used before initialization
    #[error("Relation constraint catalog used before initialization")]
    UninitializedConstraintCatalog,

    /// Initialization of the standard catalog failed
    #[error("Bootstrap failure: {message}")]
    Bootstrap {
        /// What the builder was doing
        message: String,
        /// Collaborator error, if one caused the failure
        #[source]
        source: Option<InterfaceError>,
    },

    /// The frame registry rejected a definition
    #[error("Frame registry error: {0}")]
    Registry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CaseFrameError {
    /// Helper to create a bootstrap error caused by a collaborator
    pub fn bootstrap(message: impl Into<String>, source: InterfaceError) -> Self {
        CaseFrameError::Bootstrap {
            message: message.into(),
            source: Some(source),
        }
    }

    /// True for outcomes the caller may treat as benign; no state changed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CaseFrameError::DuplicateSignature { .. }
                | CaseFrameError::SignatureNotFound { .. }
                | CaseFrameError::PriorityOutOfRange { .. }
        )
    }

    /// True for failures that must halt anything depending on standard frames
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

impl From<serde_json::Error> for CaseFrameError {
    fn from(err: serde_json::Error) -> Self {
        CaseFrameError::Configuration(err.to_string())
    }
}
