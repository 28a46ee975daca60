//! Bounded-concurrency batch invocation.
//!
//! The prompt definition is fetched once up front and shared across all
//! tasks; a failed catalog lookup fails the whole batch. Everything after
//! that point is isolated per task: each variable set produces exactly one
//! success or failure record carrying its 0-based submission index.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::PromptError;
use crate::invoker::PromptBridge;
use crate::types::{BatchFailure, BatchReport, BatchSuccess, PromptDefinition, VariableMap};

/// Permitted worker-pool bounds.
pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 10;

impl PromptBridge {
    /// Invoke one prompt over many variable sets with a bounded worker pool.
    ///
    /// `concurrency_limit` is clamped to `1..=10`. Each task is subject to
    /// the configured per-task timeout. The returned report accounts for
    /// every submitted index; results are ordered by completion.
    pub async fn invoke_batch(
        &self,
        prompt_id: &str,
        variable_sets: Vec<VariableMap>,
        version: Option<&str>,
        concurrency_limit: usize,
    ) -> Result<BatchReport, PromptError> {
        let total = variable_sets.len();
        if total == 0 {
            return Ok(BatchReport::default());
        }

        let definition: Arc<PromptDefinition> =
            Arc::new(self.catalog.get_prompt(prompt_id, version).await?);

        let workers = concurrency_limit.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
        let semaphore = Arc::new(Semaphore::new(workers));
        let task_timeout = self.config.task_timeout;

        tracing::debug!(prompt_id, total, workers, "starting batch invocation");

        let mut join_set = JoinSet::new();
        for (index, variables) in variable_sets.iter().cloned().enumerate() {
            let bridge = self.clone();
            let definition = Arc::clone(&definition);
            let semaphore = Arc::clone(&semaphore);
            let prompt_id = prompt_id.to_string();

            join_set.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        match tokio::time::timeout(
                            task_timeout,
                            bridge.invoke_resolved(&prompt_id, &definition, &variables),
                        )
                        .await
                        {
                            Ok(result) => result,
                            Err(_) => Err(PromptError::Timeout(task_timeout)),
                        }
                    }
                    Err(e) => Err(PromptError::InternalError(format!(
                        "batch worker pool closed: {e}"
                    ))),
                };
                (index, variables, result)
            });
        }

        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        let mut seen = vec![false; total];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, variables, Ok(invocation))) => {
                    seen[index] = true;
                    report.successes.push(BatchSuccess {
                        index,
                        variables,
                        invocation,
                    });
                }
                Ok((index, variables, Err(e))) => {
                    seen[index] = true;
                    tracing::warn!(prompt_id, index, "batch task failed: {e}");
                    report.failures.push(BatchFailure {
                        index,
                        variables,
                        error: e.to_string(),
                    });
                }
                Err(e) => {
                    // Panicked task; its index is recovered below so the
                    // report still accounts for every submission.
                    tracing::warn!(prompt_id, "batch task panicked: {e}");
                }
            }
        }

        for (index, was_seen) in seen.iter().enumerate() {
            if !was_seen {
                report.failures.push(BatchFailure {
                    index,
                    variables: variable_sets[index].clone(),
                    error: "task aborted before producing a result".to_string(),
                });
            }
        }

        tracing::debug!(
            prompt_id,
            successes = report.successes.len(),
            failures = report.failures.len(),
            "batch invocation finished"
        );

        Ok(report)
    }
}
