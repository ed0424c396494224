//! Transaction settlement helper.

use org_store::StoreTransaction;

use crate::WorkflowResult;

/// Commits the transaction on success, rolls it back on failure.
///
/// A commit failure (e.g. an optimistic-concurrency conflict) surfaces as
/// a `Conflict` through the `StoreError` conversion; the business outcome
/// is never partially applied. A failing rollback is logged but the
/// caller still sees the business error that triggered it.
pub(crate) async fn settle<T>(
    tx: Box<dyn StoreTransaction>,
    result: WorkflowResult<T>,
) -> WorkflowResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
