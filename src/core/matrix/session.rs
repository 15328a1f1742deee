//! Matrix session lifecycle
//!
//! A session owns the relation store for as long as the matrix is on screen.
//! It is created by a bulk load, may be reloaded, and is torn down when the
//! view goes away. Writes that complete after teardown are discarded.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use super::sync::CellSyncController;
use super::view::MatrixView;
use crate::auth::rbac::{Assignment, Permission, RelationStore, Role};
use crate::config::MatrixConfig;
use crate::core::traits::AccessApi;
use crate::utils::error::{Result, SyncError};

/// Relation store shared between the session and its controllers
pub type SharedStore = Arc<RwLock<RelationStore>>;

/// Liveness flag checked by every completion before it touches shared state
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn teardown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded role/permission matrix and the controller editing it
pub struct MatrixSession {
    api: Arc<dyn AccessApi>,
    store: SharedStore,
    liveness: Liveness,
    cells: CellSyncController,
    config: MatrixConfig,
}

impl MatrixSession {
    /// Bulk-load roles, permissions and assignments
    pub async fn load(api: Arc<dyn AccessApi>, config: MatrixConfig) -> Result<Self> {
        let (roles, permissions, assignments) = fetch_catalogs(api.as_ref()).await?;
        let store = RelationStore::from_catalogs(roles, permissions, assignments);

        info!(
            roles = store.roles().len(),
            permissions = store.permissions().len(),
            assignments = store.assignment_count(),
            "Permission matrix loaded"
        );

        let store: SharedStore = Arc::new(RwLock::new(store));
        let liveness = Liveness::new();
        let cells = CellSyncController::new(Arc::clone(&api), Arc::clone(&store), liveness.clone());

        Ok(Self {
            api,
            store,
            liveness,
            cells,
            config,
        })
    }

    /// Refetch everything and replace the catalogs, pruning orphans
    ///
    /// Refused with [`SyncError::Busy`] while any cell write is in flight,
    /// since a replaced assignment set would not see that write's outcome.
    /// On failure the current state is kept.
    pub async fn reload(&self) -> Result<()> {
        self.ensure_idle()?;
        let (roles, permissions, assignments) = fetch_catalogs(self.api.as_ref()).await?;

        if !self.liveness.is_alive() {
            warn!("View torn down during reload, discarding result");
            return Ok(());
        }

        let mut store = self.store.write();
        self.ensure_idle()?;
        store.replace_catalogs(roles, permissions, assignments);
        info!(
            roles = store.roles().len(),
            permissions = store.permissions().len(),
            assignments = store.assignment_count(),
            "Permission matrix reloaded"
        );
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        let pending = self.cells.pending_locks().len();
        if pending > 0 {
            warn!(pending, "Reload refused while cell writes are in flight");
            return Err(SyncError::busy(format!(
                "{} cell write(s) in flight",
                pending
            )));
        }
        Ok(())
    }

    pub fn cells(&self) -> &CellSyncController {
        &self.cells
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Run `f` against a view derived from the current store
    pub fn with_view<R>(&self, f: impl FnOnce(&MatrixView<'_>) -> R) -> R {
        let store = self.store.read();
        let view = MatrixView::new(&store, &self.config);
        f(&view)
    }

    /// Mark the session dead; in-flight completions will be discarded
    pub fn teardown(&self) {
        self.liveness.teardown();
        info!(
            pending = self.cells.pending_locks().len(),
            "Permission matrix torn down"
        );
    }

    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }
}

impl std::fmt::Debug for MatrixSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixSession")
            .field("revision", &self.store.read().revision())
            .field("cells", &self.cells)
            .field("alive", &self.liveness.is_alive())
            .finish()
    }
}

async fn fetch_catalogs(
    api: &dyn AccessApi,
) -> Result<(Vec<Role>, Vec<Permission>, Vec<Assignment>)> {
    tokio::try_join!(
        api.list_roles(),
        api.list_permissions(),
        api.list_role_permissions()
    )
    .map_err(|e| {
        warn!(error = %e, "Bulk load failed");
        SyncError::load_failed(e.to_string())
    })
}
