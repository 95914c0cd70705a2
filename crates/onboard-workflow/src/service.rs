//! The ingestion and dashboard collaborators the workflow consumes.

use std::future::Future;

use onboard_model::{
    AvailableField, ColumnMapping, Compatibility, ConfirmMetadata, ConfirmReceipt,
    CreateDashboardRequest, CreatedDashboard, ImportId, ProcessedFile, SourceDescriptor,
    SourceFilter, SourceId, WidgetId,
};

use crate::ServiceError;

/// External collaborator seam.
///
/// Transport, retries and timeouts belong to the implementation. Every
/// returned future must be `Send` so the controller can hold it across
/// await points of the caller's task.
pub trait OnboardingService: Send + Sync + 'static {
    fn available_fields(
        &self,
    ) -> impl Future<Output = Result<Vec<AvailableField>, ServiceError>> + Send;

    fn list_sources(
        &self,
        filter: SourceFilter,
    ) -> impl Future<Output = Result<Vec<SourceDescriptor>, ServiceError>> + Send;

    fn list_sub_sources(
        &self,
        source: SourceId,
    ) -> impl Future<Output = Result<Vec<SourceDescriptor>, ServiceError>> + Send;

    /// Produces the initial mapping draft for an uploaded file.
    fn process_file(
        &self,
        import_id: ImportId,
    ) -> impl Future<Output = Result<ProcessedFile, ServiceError>> + Send;

    fn confirm_mapping(
        &self,
        import_id: ImportId,
        mappings: Vec<ColumnMapping>,
        metadata: ConfirmMetadata,
    ) -> impl Future<Output = Result<ConfirmReceipt, ServiceError>> + Send;

    fn promote(&self, import_id: ImportId) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn compatibility(
        &self,
        widget_id: WidgetId,
        active_field_names: Vec<String>,
    ) -> impl Future<Output = Result<Compatibility, ServiceError>> + Send;

    fn create_dashboard(
        &self,
        request: CreateDashboardRequest,
    ) -> impl Future<Output = Result<CreatedDashboard, ServiceError>> + Send;
}
