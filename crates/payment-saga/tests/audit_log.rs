//! Integration tests for saga audit logging.

use payment_saga::{StepRegistry, StepStatus, run};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(&'static str);

fn increment(_ctx: &(), data: u32) -> Result<u32, TestError> {
    Ok(data + 1)
}

fn fail(_ctx: &(), _data: u32) -> Result<u32, TestError> {
    Err(TestError("intentional failure"))
}

fn nothing_to_undo(_ctx: &(), _data: &u32, _reason: &TestError) -> Result<(), TestError> {
    Ok(())
}

fn undo_refused(_ctx: &(), _data: &u32, _reason: &TestError) -> Result<(), TestError> {
    Err(TestError("cannot undo"))
}

#[test]
fn successful_execution_logs_all_steps_as_executed() -> anyhow::Result<()> {
    let registry = StepRegistry::new()
        .with_fn("step_a", increment, nothing_to_undo)
        .with_fn("step_b", increment, nothing_to_undo)
        .with_fn("step_c", increment, nothing_to_undo);

    let saga_run = run(&registry, &(), 0);

    let records = saga_run.audit_log.records();
    assert_eq!(records.len(), 3);
    for (record, expected) in records.iter().zip(["step_a", "step_b", "step_c"]) {
        assert_eq!(record.step, expected);
        assert_eq!(record.status, StepStatus::Executed);
        assert!(record.completed_at.is_some());
        assert_eq!(
            record.compensation_description.as_deref(),
            Some(format!("undo {expected}").as_str())
        );
    }
    assert_eq!(saga_run.result?, 3);
    Ok(())
}

#[test]
fn failed_run_logs_compensated_and_failed_steps() {
    let registry = StepRegistry::new()
        .with_fn("step_a", increment, nothing_to_undo)
        .with_fn("step_b", increment, undo_refused)
        .with_fn("failing", fail, nothing_to_undo)
        .with_fn("never_run", increment, nothing_to_undo);

    let saga_run = run(&registry, &(), 0);

    let statuses: Vec<(&str, StepStatus)> = saga_run
        .audit_log
        .records()
        .iter()
        .map(|r| (r.step, r.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("step_a", StepStatus::Compensated),
            ("step_b", StepStatus::CompensationFailed),
            ("failing", StepStatus::Failed),
        ]
    );
    assert_eq!(
        saga_run.audit_log.summary(),
        "↩ step_a\n⚠ step_b\n✗ failing"
    );
}

#[test]
fn failed_step_has_no_compensation_description() {
    let registry = StepRegistry::new().with_fn("failing", fail, nothing_to_undo);

    let saga_run = run(&registry, &(), 0);

    let record = &saga_run.audit_log.records()[0];
    assert_eq!(record.status, StepStatus::Failed);
    assert!(record.compensation_description.is_none());
}
