//! Optimistic-concurrency update protocol.
//!
//! Every mutation of a stored record runs the same four steps:
//!
//! 1. **Fetch** the current record, failing with `NotFound` if absent.
//! 2. **Merge** the caller's changes into it. The merge may reject the
//!    change with a validation error, in which case nothing is written.
//! 3. **Commit** through [`RecordStore::save`] carrying the version read in
//!    step 1.
//! 4. **Outcome**: the saved record with its bumped version, or
//!    [`Error::ConcurrentModification`] if another writer committed first.
//!
//! No lock is held between fetch and commit, and a lost race is never
//! retried here. The caller decides whether to re-fetch and try again.

use tracing::{debug, warn};

use crate::domain::record::Record;
use crate::error::{Error, Result};
use crate::port::outbound::store::RecordStore;

/// Run the update protocol for one record.
///
/// # Errors
/// - [`Error::NotFound`] if no record has `id`, or it vanished before commit.
/// - Whatever `merge` returns, with the store untouched.
/// - [`Error::ConcurrentModification`] if the persisted version moved on.
pub async fn update_with<T, S, F>(store: &S, id: T::Id, merge: F) -> Result<T>
where
    T: Record,
    S: RecordStore<T> + ?Sized,
    F: FnOnce(&mut T) -> Result<()> + Send,
{
    let mut record = store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found(T::KIND, id))?;
    let read_version = record.version();

    merge(&mut record)?;

    match store.save(&record).await {
        Ok(saved) => {
            debug!(
                entity = %T::KIND,
                id = %id,
                version = saved.version(),
                "Record updated"
            );
            Ok(saved)
        }
        Err(Error::VersionConflict { entity, actual, .. }) => {
            warn!(
                entity = %entity,
                id = %id,
                read_version,
                persisted_version = actual,
                "Update lost to a concurrent writer"
            );
            Err(Error::ConcurrentModification { entity })
        }
        Err(e) => Err(e),
    }
}
