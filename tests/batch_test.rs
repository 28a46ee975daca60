//! Batch orchestration: index integrity, isolation, timeouts.

mod common;

use std::collections::BTreeSet;
use std::time::Duration;

use promptgate::{BridgeConfig, PromptError, VariableMap};

use common::{bridge, bridge_with_config, claude_definition, claude_response, MockCatalog, MockRuntime};

fn variable_sets(n: usize) -> Vec<VariableMap> {
    (0..n)
        .map(|i| VariableMap::from([("topic".to_string(), format!("topic-{i}"))]))
        .collect()
}

#[tokio::test]
async fn every_submitted_index_is_accounted_for_exactly_once() {
    let bridge = bridge(
        MockCatalog::default().with_prompt(claude_definition("p", "Write about {{topic}}")),
        MockRuntime::default()
            .with_response(claude_response("done"))
            .failing_on("topic-1")
            .failing_on("topic-3"),
    );

    let report = bridge
        .invoke_batch("p", variable_sets(5), None, 3)
        .await
        .unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.successes.len() + report.failures.len(), 5);

    let indices: BTreeSet<usize> = report
        .successes
        .iter()
        .map(|s| s.index)
        .chain(report.failures.iter().map(|f| f.index))
        .collect();
    assert_eq!(indices, (0..5).collect());
}

#[tokio::test]
async fn one_failing_task_does_not_affect_the_others() {
    let bridge = bridge(
        MockCatalog::default().with_prompt(claude_definition("p", "Write about {{topic}}")),
        MockRuntime::default()
            .with_response(claude_response("done"))
            .failing_on("topic-2"),
    );

    let report = bridge
        .invoke_batch("p", variable_sets(5), None, 2)
        .await
        .unwrap();

    assert_eq!(report.successes.len(), 4);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.index, 2);
    assert_eq!(failure.variables["topic"], "topic-2");
    assert!(failure.error.contains("injected failure"));
    for success in &report.successes {
        assert_eq!(success.invocation.completion, "done");
    }
}

#[tokio::test]
async fn failure_records_keep_the_submitted_variables() {
    let bridge = bridge(
        MockCatalog::default().with_prompt(claude_definition("p", "{{topic}}")),
        MockRuntime::default().failing_on("topic-0"),
    );

    let report = bridge
        .invoke_batch("p", variable_sets(1), None, 1)
        .await
        .unwrap();

    assert_eq!(report.failures[0].variables["topic"], "topic-0");
}

#[tokio::test]
async fn empty_submission_yields_an_empty_report() {
    let bridge = bridge(
        MockCatalog::default().with_prompt(claude_definition("p", "hi")),
        MockRuntime::default().with_response(claude_response("done")),
    );

    let report = bridge.invoke_batch("p", Vec::new(), None, 5).await.unwrap();
    assert_eq!(report.total, 0);
    assert!(report.successes.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn failed_catalog_lookup_fails_the_whole_batch() {
    let bridge = bridge(MockCatalog::default(), MockRuntime::default());
    let err = bridge
        .invoke_batch("nope", variable_sets(3), None, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::NotFound(_)));
}

#[tokio::test]
async fn out_of_range_concurrency_is_clamped_not_rejected() {
    let bridge = bridge(
        MockCatalog::default().with_prompt(claude_definition("p", "{{topic}}")),
        MockRuntime::default().with_response(claude_response("done")),
    );

    for limit in [0, 1, 10, 99] {
        let report = bridge
            .invoke_batch("p", variable_sets(3), None, limit)
            .await
            .unwrap();
        assert_eq!(report.successes.len(), 3);
    }
}

#[tokio::test(start_paused = true)]
async fn slow_tasks_are_recorded_as_timeouts() {
    let config = BridgeConfig::default().with_task_timeout(Duration::from_millis(100));
    let bridge = bridge_with_config(
        MockCatalog::default().with_prompt(claude_definition("p", "{{topic}}")),
        MockRuntime::default()
            .with_response(claude_response("done"))
            .with_delay(Duration::from_secs(5)),
        config,
    );

    let report = bridge
        .invoke_batch("p", variable_sets(2), None, 2)
        .await
        .unwrap();

    assert_eq!(report.failures.len(), 2);
    for failure in &report.failures {
        assert!(failure.error.contains("timed out"), "got: {}", failure.error);
    }
}
