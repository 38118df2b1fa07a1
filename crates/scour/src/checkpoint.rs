//! Build-once, replay-many database reset.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use scour_core::{DeletionPlan, Error, ResetFilter, Result};
use scour_dialect::DbAdapter;

use crate::client::DatabaseClient;
use crate::introspect;

/// Options applied to every metadata query and reset execution.
#[derive(Debug, Clone, Default)]
pub struct CheckpointOptions {
    pub filter: ResetFilter,
    /// Upper bound for each individual statement; `None` defers to the
    /// driver's own default.
    pub command_timeout: Option<Duration>,
}

/// Rendered form of a deletion plan, cached alongside it.
#[derive(Debug)]
struct CompiledPlan {
    plan: DeletionPlan,
    disable_sql: String,
    delete_sql: String,
}

/// Resets a database to an empty-data state between test runs.
///
/// The deletion plan is introspected and compiled on the first
/// [`Checkpoint::reset`] call and replayed verbatim afterwards;
/// constructing a new checkpoint is the only way to pick up schema
/// changes.
pub struct Checkpoint {
    adapter: Box<dyn DbAdapter>,
    options: CheckpointOptions,
    // None until the first successful build. The lock serializes the
    // build-or-reuse decision across concurrent resets on one instance.
    compiled: Mutex<Option<Arc<CompiledPlan>>>,
}

impl Checkpoint {
    pub fn new(adapter: impl DbAdapter + 'static) -> Self {
        Self::with_options(adapter, CheckpointOptions::default())
    }

    pub fn with_options(adapter: impl DbAdapter + 'static, options: CheckpointOptions) -> Self {
        Self {
            adapter: Box::new(adapter),
            options,
            compiled: Mutex::new(None),
        }
    }

    /// Delete every row of every non-ignored table inside one transaction.
    ///
    /// Constraint-disable statements run first, then the deletes in plan
    /// order. On any failure the transaction is rolled back, the error
    /// propagates, and the prior data state is preserved; an already-built
    /// plan stays cached.
    pub async fn reset(&self, client: &mut dyn DatabaseClient) -> Result<()> {
        let compiled = self.compiled_plan(client).await?;

        if compiled.plan.is_empty() {
            debug!(engine = self.adapter.name(), "nothing matched the filter, skipping reset");
            return Ok(());
        }

        client.begin().await?;
        match self.run_compiled(client, &compiled).await {
            Ok(()) => client.commit().await,
            Err(err) => {
                // Keep the original failure even if rollback fails too.
                if let Err(rollback_err) = client.rollback().await {
                    debug!(error = %rollback_err, "rollback failed after reset error");
                }
                Err(err)
            }
        }
    }

    /// Build (or reuse) the deletion plan without executing anything.
    pub async fn deletion_plan(&self, client: &mut dyn DatabaseClient) -> Result<DeletionPlan> {
        Ok(self.compiled_plan(client).await?.plan.clone())
    }

    async fn compiled_plan(&self, client: &mut dyn DatabaseClient) -> Result<Arc<CompiledPlan>> {
        let mut slot = self.compiled.lock().await;
        if let Some(compiled) = slot.as_ref() {
            return Ok(Arc::clone(compiled));
        }

        // A failed build leaves the slot empty; the next call starts over.
        let compiled = Arc::new(self.build(client).await?);
        *slot = Some(Arc::clone(&compiled));
        Ok(compiled)
    }

    async fn build(&self, client: &mut dyn DatabaseClient) -> Result<CompiledPlan> {
        let adapter = self.adapter.as_ref();
        let filter = &self.options.filter;

        let tables = self
            .timed(introspect::fetch_tables(client, adapter, filter))
            .await?;
        let relationships = self
            .timed(introspect::fetch_relationships(client, adapter, filter))
            .await?;

        let plan = scour_core::resolve(&tables, &relationships);
        let disable_sql =
            adapter.build_disable_fk_command(&plan.constraints_to_disable, &relationships);
        let delete_sql = adapter.build_delete_command(&plan.delete_order);

        info!(
            engine = adapter.name(),
            tables = plan.delete_order.len(),
            disabled = plan.constraints_to_disable.len(),
            "built deletion plan"
        );

        Ok(CompiledPlan {
            plan,
            disable_sql,
            delete_sql,
        })
    }

    async fn run_compiled(
        &self,
        client: &mut dyn DatabaseClient,
        compiled: &CompiledPlan,
    ) -> Result<()> {
        for sql in statements(&compiled.disable_sql).chain(statements(&compiled.delete_sql)) {
            self.timed(client.execute(sql)).await?;
        }
        Ok(())
    }

    async fn timed<T>(&self, round_trip: impl Future<Output = Result<T>>) -> Result<T> {
        match self.options.command_timeout {
            Some(limit) => tokio::time::timeout(limit, round_trip)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => round_trip.await,
        }
    }
}

/// Split compiled command text into individual statements.
fn statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}

#[cfg(test)]
mod tests {
    use super::statements;

    #[test]
    fn splits_compiled_text_into_statements() {
        let sql = "SET FOREIGN_KEY_CHECKS=0;\nDELETE FROM `a`;\n";
        let parts: Vec<&str> = statements(sql).collect();
        assert_eq!(parts, vec!["SET FOREIGN_KEY_CHECKS=0", "DELETE FROM `a`"]);
    }

    #[test]
    fn empty_text_yields_no_statements() {
        assert_eq!(statements("").count(), 0);
    }
}
