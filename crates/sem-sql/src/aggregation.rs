//! Aggregation construction (§4.4.1): turn a measure kind and its
//! macro-expanded expression into a `<agg_expr> AS "label"` clause body.

use crate::predicate::combine_predicates;
use sem_core::entity::MeasureKind;

/// Build the aggregation expression for a measure of `kind`, over
/// `expr` (unused for `count`), gated by zero or more already-lowered
/// `predicates`.
pub fn render_aggregation(kind: MeasureKind, expr: Option<&str>, predicates: &[String]) -> String {
    let pred_clause = combine_predicates(predicates);

    match kind {
        MeasureKind::Count => match pred_clause {
            None => "COUNT(*)".to_string(),
            Some(pred) => format!("COUNT_IF({pred})"),
        },
        MeasureKind::CountDistinct => {
            let expr = expr.expect("count_distinct measure requires an expression");
            match pred_clause {
                None => format!("COUNT(DISTINCT {expr})"),
                Some(pred) => format!("COUNT(DISTINCT IFF({pred}, {expr}, NULL))"),
            }
        }
        MeasureKind::Sum | MeasureKind::Avg | MeasureKind::Min | MeasureKind::Max => {
            let op = match kind {
                MeasureKind::Sum => "SUM",
                MeasureKind::Avg => "AVG",
                MeasureKind::Min => "MIN",
                MeasureKind::Max => "MAX",
                _ => unreachable!(),
            };
            let expr = expr.expect("sum/avg/min/max measure requires an expression");
            match pred_clause {
                None => format!("{op}({expr})"),
                Some(pred) => format!("{op}(IFF({pred}, {expr}, NULL))"),
            }
        }
    }
}

#[cfg(test)]
#[path = "aggregation_test.rs"]
mod tests;
