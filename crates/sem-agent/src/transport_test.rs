use super::*;
use crate::state::TerminationReason;
use serde_json::json;

#[test]
fn tool_input_carries_the_input_payload() {
    let event = TransportEvent::tool_input("build_sql", json!({"plan": "x"}));
    assert_eq!(event.kind, TransportEventKind::ToolInput);
    assert_eq!(event.tool_name.as_deref(), Some("build_sql"));
    assert_eq!(event.input, Some(json!({"plan": "x"})));
    assert!(event.output.is_none());
}

#[test]
fn continued_and_advanced_outcomes_become_step_boundaries() {
    let continued = StepOutcome::Continued { phase: crate::phase::Phase::Building };
    let event = TransportEvent::from_outcome("build_sql", &continued);
    assert_eq!(event.kind, TransportEventKind::StepBoundary);
    assert_eq!(event.tool_name.as_deref(), Some("build_sql"));
}

#[test]
fn report_complete_becomes_done_with_no_error() {
    let terminated = StepOutcome::Terminated { reason: TerminationReason::ReportComplete };
    let event = TransportEvent::from_outcome("finalize_report", &terminated);
    assert_eq!(event.kind, TransportEventKind::Done);
    assert!(event.error.is_none());
}

#[test]
fn fatal_error_becomes_done_carrying_the_reason_as_error() {
    let reason = TerminationReason::FatalError("validator rejected the rendered SQL".to_string());
    let event = TransportEvent::done(&reason);
    assert_eq!(event.kind, TransportEventKind::Done);
    assert_eq!(event.error.as_deref(), Some("validator rejected the rendered SQL"));
}

#[test]
fn serializes_with_absent_fields_omitted() {
    let event = TransportEvent::step_boundary("compute_join_path");
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], json!("step_boundary"));
    assert_eq!(value["toolName"], json!("compute_join_path"));
    assert!(value.get("input").is_none());
    assert!(value.get("error").is_none());
}
