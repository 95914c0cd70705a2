//! Workflow error types.
//!
//! Every rejected intent and every failed collaborator call is reported as a
//! [`WorkflowError`]. Errors carry enough classification for a front end to
//! decide how to show them: best-effort failures are logged, blocking ones
//! keep the user on the current stage until they retry.

use std::fmt;

use thiserror::Error;

use onboard_layout::LayoutError;
use onboard_map::MappingError;
use onboard_model::{ModelError, SourceId, WidgetId};

use crate::Stage;

/// Failure reported by an external collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collaborator call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceOperation {
    AvailableFields,
    ListSources,
    ListSubSources,
    ProcessFile,
    ConfirmMapping,
    Promote,
    Compatibility,
    CreateDashboard,
}

impl ServiceOperation {
    pub const ALL: [ServiceOperation; 8] = [
        ServiceOperation::AvailableFields,
        ServiceOperation::ListSources,
        ServiceOperation::ListSubSources,
        ServiceOperation::ProcessFile,
        ServiceOperation::ConfirmMapping,
        ServiceOperation::Promote,
        ServiceOperation::Compatibility,
        ServiceOperation::CreateDashboard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AvailableFields => "Loading available fields",
            Self::ListSources => "Loading sources",
            Self::ListSubSources => "Loading sub-sources",
            Self::ProcessFile => "Processing file",
            Self::ConfirmMapping => "Confirming mapping",
            Self::Promote => "Promoting import",
            Self::Compatibility => "Checking widget compatibility",
            Self::CreateDashboard => "Creating dashboard",
        }
    }

    /// Whether a failure of this call halts progression.
    ///
    /// The field catalog and compatibility lookups are best-effort.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::AvailableFields | Self::Compatibility)
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Workflow errors.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum WorkflowError {
    // =========================================================================
    // SESSION & STAGE GUARDS
    // =========================================================================
    /// An intent arrived while the wizard is closed.
    #[error("The onboarding wizard is not open")]
    NotOpen,

    /// The intent is not valid on the current stage.
    #[error("Cannot {action} while on the {stage} stage")]
    InvalidTransition { stage: Stage, action: &'static str },

    /// Back was requested on the first stage.
    #[error("There is no stage before {0}")]
    NoPreviousStage(Stage),

    /// Another operation is still in flight.
    #[error("{operation} is still in progress")]
    Busy { operation: ServiceOperation },

    // =========================================================================
    // SELECTION CONTEXT
    // =========================================================================
    /// The selection context is still loading or failed to load.
    #[error("Selection is not ready: {reason}")]
    ContextNotReady { reason: &'static str },

    #[error("No source is selected")]
    NoSourceSelected,

    #[error("Source '{0}' requires a sub-source selection")]
    NoSubSourceSelected(SourceId),

    #[error("Unknown source '{0}'")]
    UnknownSource(SourceId),

    /// Skip requested for a source without a confirmed schema.
    #[error("Source '{0}' has no confirmed schema to reuse")]
    SourceNotMature(SourceId),

    // =========================================================================
    // MAPPING
    // =========================================================================
    /// No processed file is available to map.
    #[error("No file has been processed yet")]
    NoDraft,

    /// The processed draft violated a model invariant.
    #[error("Processed file is invalid: {0}")]
    InvalidDraft(#[from] ModelError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    // =========================================================================
    // WIDGETS & SUBMISSION
    // =========================================================================
    #[error("Unknown widget '{0}'")]
    UnknownWidget(WidgetId),

    #[error("Select at least one widget")]
    NoWidgetsSelected,

    #[error("No data source is associated with this session")]
    NoDataSource,

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    // =========================================================================
    // COLLABORATORS
    // =========================================================================
    /// An external collaborator rejected the call.
    #[error("{operation} failed: {source}")]
    Service {
        operation: ServiceOperation,
        #[source]
        source: ServiceError,
    },

    /// The driver ran out of work before the awaited condition held.
    #[error("Workflow was interrupted before the operation finished")]
    Interrupted,
}

impl WorkflowError {
    pub fn service(operation: ServiceOperation, source: ServiceError) -> Self {
        Self::Service { operation, source }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Service { operation, .. } if operation.is_blocking() => ErrorCategory::Blocking,
            Self::Service { .. } => ErrorCategory::BestEffort,

            Self::NotOpen
            | Self::InvalidTransition { .. }
            | Self::NoPreviousStage(_)
            | Self::Busy { .. }
            | Self::ContextNotReady { .. }
            | Self::NoSourceSelected
            | Self::NoSubSourceSelected(_)
            | Self::UnknownSource(_)
            | Self::SourceNotMature(_)
            | Self::NoDraft
            | Self::UnknownWidget(_)
            | Self::NoWidgetsSelected => ErrorCategory::Guard,

            Self::Mapping(MappingError::GateBlocked { .. }) => ErrorCategory::Invariant,
            Self::Mapping(_) => ErrorCategory::Guard,

            Self::InvalidDraft(_) | Self::NoDataSource | Self::Interrupted => {
                ErrorCategory::Invariant
            }

            Self::Layout(LayoutError::RowBoundExceeded { .. }) => ErrorCategory::Degeneracy,
            Self::Layout(_) => ErrorCategory::Invariant,
        }
    }

    /// Best-effort failures that are logged and otherwise ignored.
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::BestEffort
    }

    /// Failures that halt progression until the user retries.
    pub fn is_blocking(&self) -> bool {
        self.category() == ErrorCategory::Blocking
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotOpen => Some("Open the onboarding wizard first."),
            Self::ContextNotReady { .. } => {
                Some("Wait for the source list to load, or re-select the source to retry.")
            }
            Self::NoSourceSelected | Self::UnknownSource(_) => {
                Some("Choose a source from the list.")
            }
            Self::NoSubSourceSelected(_) => Some("Choose a sub-source for the selected source."),
            Self::SourceNotMature(_) => Some("Upload a file and map its columns instead."),
            Self::NoDraft => Some("Upload a file to continue."),
            Self::Mapping(MappingError::GateBlocked { .. }) => {
                Some("Resolve conflicting targets and map or ignore every remaining column.")
            }
            Self::Mapping(MappingError::Finalized) => {
                Some("The mapping is confirmed; go back and start a new import to change it.")
            }
            Self::Mapping(_) => Some("Choose a column and field from the current draft."),
            Self::NoWidgetsSelected => Some("Select one or more widgets."),
            Self::Layout(LayoutError::TooWide { .. }) => {
                Some("Increase the grid width or remove the widget.")
            }
            Self::Layout(LayoutError::TooTall { .. }) => {
                Some("Raise layout.max_rows or remove the widget.")
            }
            Self::Service { operation, .. } if operation.is_blocking() => {
                Some("Check the connection and try again.")
            }
            Self::Service { .. } => Some("The session continues with partial data."),
            _ => None,
        }
    }
}

/// Error category, following how each failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Logged; the session continues with partial data.
    BestEffort,
    /// Shown to the user; the stage is kept so the action can be retried.
    Blocking,
    /// A guard rejected a user intent.
    Guard,
    /// A condition that the workflow structure should have prevented.
    Invariant,
    /// The layout packer hit its row-scan bound.
    Degeneracy,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BestEffort => "Warning",
            Self::Blocking => "Error",
            Self::Guard => "Not allowed",
            Self::Invariant => "Internal error",
            Self::Degeneracy => "Layout error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_failures_are_best_effort() {
        let err = WorkflowError::service(ServiceOperation::AvailableFields, ServiceError::new("x"));
        assert!(err.is_transient());
        assert!(!err.is_blocking());

        let err = WorkflowError::service(ServiceOperation::ListSources, ServiceError::new("x"));
        assert!(err.is_blocking());
        assert_eq!(err.to_string(), "Loading sources failed: x");
    }

    #[test]
    fn gate_violation_is_an_invariant() {
        let err = WorkflowError::from(MappingError::GateBlocked {
            conflicts: 1,
            needs_attention: 0,
        });
        assert_eq!(err.category(), ErrorCategory::Invariant);
        assert!(err.suggestion().is_some());
    }
}
