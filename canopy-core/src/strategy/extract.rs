//! Indicator extraction and strategy validation.
//!
//! Both walk the entry and exit trees iteratively (explicit work
//! stack), so arbitrarily deep documents cannot overflow the call
//! stack.

use crate::error::ConfigError;
use crate::strategy::{
    Condition, IndicatorKey, IndicatorKind, IndicatorRef, Operand, Strategy, StrategyNode,
};
use std::collections::HashSet;

/// Collect the deduplicated set of computed indicators the strategy
/// needs, in first-occurrence (depth-first, entry before exit) order.
///
/// Lookup kinds (PRICE, OPEN, ..., USDINR) read candle fields directly
/// and are not registered.
pub fn extract_indicators(strategy: &Strategy) -> Vec<IndicatorRef> {
    let mut seen: HashSet<IndicatorKey> = HashSet::new();
    let mut refs: Vec<IndicatorRef> = Vec::new();

    let mut register = |r: IndicatorRef| {
        if r.kind.is_computed() && seen.insert(r.key()) {
            refs.push(r);
        }
    };

    for_each_condition(strategy, |cond| {
        register(cond.left);
        if let Operand::Indicator(right) = cond.operand {
            register(right);
        }
    });

    refs
}

/// True if any condition references the USD/INR rate.
pub fn uses_usd_inr(strategy: &Strategy) -> bool {
    let mut found = false;
    for_each_condition(strategy, |cond| {
        if cond.left.kind == IndicatorKind::Usdinr {
            found = true;
        }
        if let Operand::Indicator(right) = cond.operand {
            if right.kind == IndicatorKind::Usdinr {
                found = true;
            }
        }
    });
    found
}

/// Validate a strategy document before any simulation work starts.
///
/// Checks: every windowed indicator carries a period, node ids are
/// unique across both trees, and the stop/target percentages are
/// finite and non-negative. Operand consistency is already enforced
/// structurally at deserialization.
pub fn validate_strategy(strategy: &Strategy) -> Result<(), ConfigError> {
    for pct in [strategy.stop_loss_pct, strategy.take_profit_pct] {
        if !pct.is_finite() || pct < 0.0 {
            return Err(ConfigError::InvalidRiskPct { value: pct });
        }
    }

    let mut ids: HashSet<&str> = HashSet::new();
    let mut result: Result<(), ConfigError> = Ok(());

    for root in [&strategy.entry_logic, &strategy.exit_logic] {
        if !ids.insert(root.id.as_str()) {
            return Err(ConfigError::DuplicateNodeId {
                node_id: root.id.to_string(),
            });
        }
    }

    for_each_node(strategy, |node| {
        if result.is_err() {
            return;
        }
        let id = match node {
            StrategyNode::Group(g) => g.id.as_str(),
            StrategyNode::Condition(c) => c.id.as_str(),
        };
        if !ids.insert(id) {
            result = Err(ConfigError::DuplicateNodeId {
                node_id: id.to_string(),
            });
            return;
        }
        if let StrategyNode::Condition(cond) = node {
            result = check_periods(cond);
        }
    });

    result
}

fn check_periods(cond: &Condition) -> Result<(), ConfigError> {
    let check = |r: &IndicatorRef| {
        if r.kind.requires_period() && r.period.is_none() {
            Err(ConfigError::MissingPeriod {
                kind: r.kind,
                node_id: Some(cond.id.to_string()),
            })
        } else {
            Ok(())
        }
    };
    check(&cond.left)?;
    if let Operand::Indicator(right) = &cond.operand {
        check(right)?;
    }
    Ok(())
}

/// Depth-first visit of every node in both trees, entry tree first.
fn for_each_node<'a>(strategy: &'a Strategy, mut visit: impl FnMut(&'a StrategyNode)) {
    // Root groups are not StrategyNode values; callers that need the
    // root ids handle them directly.
    let mut stack: Vec<&'a StrategyNode> = Vec::new();
    for root in [&strategy.entry_logic, &strategy.exit_logic] {
        for child in root.children.iter().rev() {
            stack.push(child);
        }
        while let Some(node) = stack.pop() {
            visit(node);
            if let StrategyNode::Group(g) = node {
                for child in g.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
    }
}

fn for_each_condition<'a>(strategy: &'a Strategy, mut visit: impl FnMut(&'a Condition)) {
    for_each_node(strategy, |node| {
        if let StrategyNode::Condition(cond) = node {
            visit(cond);
        }
    });
}
