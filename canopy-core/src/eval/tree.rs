//! Boolean evaluation of a strategy tree at a single bar.
//!
//! Iterative with an explicit frame stack, so arbitrarily deep trees
//! from the editor cannot overflow the call stack. Children evaluate
//! in document order with short-circuiting; an empty group is false
//! under both operators.

use crate::domain::AugmentedCandle;
use crate::eval::condition::evaluate_condition;
use crate::strategy::{Group, LogicOp, StrategyNode};

/// The child value that decides a group early.
fn short_circuit(op: LogicOp) -> bool {
    match op {
        LogicOp::And => false,
        LogicOp::Or => true,
    }
}

/// The group value when every child was seen without short-circuiting.
fn exhausted(op: LogicOp) -> bool {
    match op {
        LogicOp::And => true,
        LogicOp::Or => false,
    }
}

struct Frame<'a> {
    group: &'a Group,
    next_child: usize,
}

impl<'a> Frame<'a> {
    fn new(group: &'a Group) -> Self {
        Self {
            group,
            next_child: 0,
        }
    }
}

/// Evaluate a group tree at bar `bar`.
pub fn evaluate_group(series: &[AugmentedCandle], root: &Group, bar: usize) -> bool {
    let mut stack = vec![Frame::new(root)];
    let mut finished: Option<bool> = None;

    while let Some(frame) = stack.last_mut() {
        // A child group just produced `value`; short-circuit or resume.
        if let Some(value) = finished.take() {
            if value == short_circuit(frame.group.operator) {
                finished = Some(value);
                stack.pop();
                continue;
            }
        }

        let group = frame.group;
        let mut outcome: Option<bool> = None;
        let mut descend: Option<&Group> = None;

        loop {
            if group.children.is_empty() {
                // Empty groups are false regardless of operator.
                outcome = Some(false);
                break;
            }
            if frame.next_child == group.children.len() {
                outcome = Some(exhausted(group.operator));
                break;
            }
            match &group.children[frame.next_child] {
                StrategyNode::Condition(cond) => {
                    frame.next_child += 1;
                    let value = evaluate_condition(series, cond, bar);
                    if value == short_circuit(group.operator) {
                        outcome = Some(value);
                        break;
                    }
                }
                StrategyNode::Group(child) => {
                    frame.next_child += 1;
                    descend = Some(child);
                    break;
                }
            }
        }

        if let Some(child) = descend {
            stack.push(Frame::new(child));
            continue;
        }
        finished = outcome;
        stack.pop();
    }

    finished.unwrap_or(false)
}
