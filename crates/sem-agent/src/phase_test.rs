use super::*;

#[test]
fn planning_allow_list_includes_its_terminal_tools() {
    let allow_list = Phase::Planning.tool_allow_list();
    assert!(allow_list.contains(&"finalize_plan"));
    assert!(allow_list.contains(&"finalize_no_data"));
    assert!(allow_list.contains(&"clarify_intent"));
}

#[test]
fn each_phase_allow_list_contains_its_own_terminal_tool() {
    for phase in [Phase::Planning, Phase::Building, Phase::Execution, Phase::Reporting] {
        assert!(phase.tool_allow_list().contains(&phase.terminal_tool()), "{phase} allow-list missing its terminal tool");
    }
}

#[test]
fn phases_advance_in_order_and_reporting_is_terminal() {
    assert_eq!(Phase::Planning.next(), Some(Phase::Building));
    assert_eq!(Phase::Building.next(), Some(Phase::Execution));
    assert_eq!(Phase::Execution.next(), Some(Phase::Reporting));
    assert_eq!(Phase::Reporting.next(), None);
}

#[test]
fn execution_tools_do_not_include_planning_tools() {
    assert!(!Phase::Execution.tool_allow_list().contains(&"finalize_plan"));
}
