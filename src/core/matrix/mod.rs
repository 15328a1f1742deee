//! Role/permission matrix editing
//!
//! The matrix is loaded into a [`RelationStore`](crate::auth::rbac::RelationStore)
//! owned by a [`MatrixSession`]. Cells are edited optimistically through the
//! [`CellSyncController`]; [`MatrixView`] derives everything that is displayed.

mod deletion;
mod lock;
mod session;
mod sync;
#[cfg(test)]
pub(crate) mod testing;
mod view;

pub use deletion::{DeleteOutcome, DeletionController, UserRoleRef};
pub use lock::{PendingLock, PendingLocks};
pub use session::{Liveness, MatrixSession, SharedStore};
pub use sync::{CellResult, CellSyncController, ToggleOutcome};
pub use view::{
    CellState, Coverage, MatrixView, MatrixViewState, ResourceRow, RoleCells,
};
