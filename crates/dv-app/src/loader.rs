//! Background dataset loading
//!
//! Loads run on the app's tokio runtime. The result lands in a shared slot
//! the UI thread polls once per frame.

use std::path::PathBuf;
use std::sync::Arc;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{error, info};

use dv_core::RecordStore;
use dv_data::{CsvRecordSource, DemoSource, LoadError, LoaderConfig};

/// What to load
#[derive(Debug, Clone, PartialEq)]
pub enum DataRequest {
    Csv(PathBuf),
    Demo,
}

impl DataRequest {
    /// Name shown while loading and on the error screen
    pub fn label(&self) -> String {
        match self {
            DataRequest::Csv(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DataRequest::Demo => "Demo dataset".to_string(),
        }
    }
}

/// Finished load, tagged with the request it answers
#[derive(Debug)]
pub struct LoadOutcome {
    pub id: u64,
    pub label: String,
    pub result: Result<RecordStore, LoadError>,
}

/// Slot shared between the load task and the UI thread
#[derive(Clone, Default)]
pub struct PendingLoad(Arc<Mutex<Option<LoadOutcome>>>);

impl PendingLoad {
    pub fn fill(&self, outcome: LoadOutcome) {
        *self.0.lock() = Some(outcome);
    }

    pub fn take(&self) -> Option<LoadOutcome> {
        self.0.lock().take()
    }
}

pub async fn load(request: DataRequest, config: LoaderConfig) -> Result<RecordStore, LoadError> {
    match request {
        DataRequest::Csv(path) => CsvRecordSource::new(path, config).load().await,
        DataRequest::Demo => tokio::task::spawn_blocking(|| DemoSource::default().load()).await?,
    }
}

/// Start loading on `runtime`. `on_done` runs after the slot is filled.
pub fn spawn_load(
    runtime: &Handle,
    id: u64,
    request: DataRequest,
    config: LoaderConfig,
    slot: PendingLoad,
    on_done: impl FnOnce() + Send + 'static,
) {
    let label = request.label();
    info!("Loading {} (request {})", label, id);

    runtime.spawn(async move {
        let result = load(request, config).await;
        match &result {
            Ok(store) => info!("{} ready: {} records", label, store.len()),
            Err(e) => error!("Failed to load {}: {}", label, e),
        }
        slot.fill(LoadOutcome { id, label, result });
        on_done();
    });
}
