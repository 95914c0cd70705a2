//! In-memory collaborator backed by fixed data.
//!
//! Used to replay recorded sessions and to exercise the controller without
//! a backend. Every call is counted, individual operations can be made to
//! fail, and created dashboards are kept for inspection.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;

use onboard_model::{
    AvailableField, ColumnMapping, Compatibility, CompatibilityStatus, ConfirmMetadata,
    ConfirmReceipt, CreateDashboardRequest, CreatedDashboard, DataSourceId, ImportId,
    ProcessedFile, SourceDescriptor, SourceFilter, SourceId, WidgetId,
};

use crate::{OnboardingService, ServiceError, ServiceOperation};

/// Data served by [`InMemoryService`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceFixture {
    pub fields: Vec<AvailableField>,
    pub sources: Vec<SourceDescriptor>,
    pub sub_sources: BTreeMap<SourceId, Vec<SourceDescriptor>>,
    pub files: BTreeMap<ImportId, ProcessedFile>,
    /// Widgets missing here are reported as unsupported.
    pub compatibility: BTreeMap<WidgetId, CompatibilityStatus>,
}

#[derive(Debug, Default)]
struct Journal {
    calls: BTreeMap<ServiceOperation, usize>,
    failing: BTreeSet<ServiceOperation>,
    confirmations: Vec<(ImportId, ConfirmMetadata)>,
    dashboards: Vec<CreateDashboardRequest>,
}

#[derive(Debug, Default)]
pub struct InMemoryService {
    fixture: ServiceFixture,
    journal: Mutex<Journal>,
}

impl InMemoryService {
    pub fn new(fixture: ServiceFixture) -> Self {
        Self {
            fixture,
            journal: Mutex::default(),
        }
    }

    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every later call of `operation` fail.
    pub fn fail(&self, operation: ServiceOperation) {
        self.journal().failing.insert(operation);
    }

    pub fn recover(&self, operation: ServiceOperation) {
        self.journal().failing.remove(&operation);
    }

    pub fn calls(&self, operation: ServiceOperation) -> usize {
        self.journal().calls.get(&operation).copied().unwrap_or(0)
    }

    pub fn confirmations(&self) -> Vec<(ImportId, ConfirmMetadata)> {
        self.journal().confirmations.clone()
    }

    pub fn dashboards(&self) -> Vec<CreateDashboardRequest> {
        self.journal().dashboards.clone()
    }

    /// Counts the call and reports whether it should fail.
    fn enter(&self, operation: ServiceOperation) -> Result<(), ServiceError> {
        let mut journal = self.journal();
        *journal.calls.entry(operation).or_insert(0) += 1;
        if journal.failing.contains(&operation) {
            tracing::debug!(%operation, "injected failure");
            return Err(ServiceError::new(format!("{} is unavailable", operation.label())));
        }
        Ok(())
    }
}

fn matches_filter(source: &SourceDescriptor, filter: &SourceFilter) -> bool {
    filter.search.as_deref().is_none_or(|needle| {
        source
            .name
            .to_lowercase()
            .contains(&needle.trim().to_lowercase())
    })
}

impl OnboardingService for InMemoryService {
    async fn available_fields(&self) -> Result<Vec<AvailableField>, ServiceError> {
        self.enter(ServiceOperation::AvailableFields)?;
        Ok(self.fixture.fields.clone())
    }

    async fn list_sources(
        &self,
        filter: SourceFilter,
    ) -> Result<Vec<SourceDescriptor>, ServiceError> {
        self.enter(ServiceOperation::ListSources)?;
        Ok(self
            .fixture
            .sources
            .iter()
            .filter(|s| matches_filter(s, &filter))
            .cloned()
            .collect())
    }

    async fn list_sub_sources(
        &self,
        source: SourceId,
    ) -> Result<Vec<SourceDescriptor>, ServiceError> {
        self.enter(ServiceOperation::ListSubSources)?;
        Ok(self
            .fixture
            .sub_sources
            .get(&source)
            .cloned()
            .unwrap_or_default())
    }

    async fn process_file(&self, import_id: ImportId) -> Result<ProcessedFile, ServiceError> {
        self.enter(ServiceOperation::ProcessFile)?;
        self.fixture
            .files
            .get(&import_id)
            .cloned()
            .ok_or_else(|| ServiceError::new(format!("import '{import_id}' not found")))
    }

    async fn confirm_mapping(
        &self,
        import_id: ImportId,
        mappings: Vec<ColumnMapping>,
        metadata: ConfirmMetadata,
    ) -> Result<ConfirmReceipt, ServiceError> {
        self.enter(ServiceOperation::ConfirmMapping)?;
        let data_source_id = DataSourceId::new(format!("ds-{import_id}"))
            .map_err(|e| ServiceError::new(e.to_string()))?;
        tracing::debug!(import = %import_id, columns = mappings.len(), "confirmation recorded");
        self.journal().confirmations.push((import_id, metadata));
        Ok(ConfirmReceipt { data_source_id })
    }

    async fn promote(&self, _import_id: ImportId) -> Result<(), ServiceError> {
        self.enter(ServiceOperation::Promote)
    }

    async fn compatibility(
        &self,
        widget_id: WidgetId,
        _active_field_names: Vec<String>,
    ) -> Result<Compatibility, ServiceError> {
        self.enter(ServiceOperation::Compatibility)?;
        let status = self
            .fixture
            .compatibility
            .get(&widget_id)
            .copied()
            .unwrap_or(CompatibilityStatus::Unsupported);
        Ok(Compatibility { status })
    }

    async fn create_dashboard(
        &self,
        request: CreateDashboardRequest,
    ) -> Result<CreatedDashboard, ServiceError> {
        self.enter(ServiceOperation::CreateDashboard)?;
        let mut journal = self.journal();
        journal.dashboards.push(request);
        Ok(CreatedDashboard {
            id: format!("dash-{}", journal.dashboards.len()),
        })
    }
}
