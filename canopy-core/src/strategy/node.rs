//! The strategy tree: an immutable tagged union of conditions and groups.
//!
//! The wire form of a condition carries the `right`/`value` field pair
//! from the editor. In memory the pair collapses into the `Operand`
//! sum type, so "both set" and "neither set" cannot be represented —
//! both are rejected as `ConfigError` at deserialization.

use crate::domain::NodeId;
use crate::error::ConfigError;
use crate::strategy::IndicatorRef;
use serde::{Deserialize, Serialize};

/// Comparison operator of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparator {
    Gt,
    Lt,
    Eq,
    CrossAbove,
    CrossBelow,
}

/// Right-hand operand of a condition: a fixed number or another indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Value(f64),
    Indicator(IndicatorRef),
}

/// Leaf comparison: `left <comparator> operand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionWire", into = "ConditionWire")]
pub struct Condition {
    pub id: NodeId,
    pub left: IndicatorRef,
    pub comparator: Comparator,
    pub operand: Operand,
}

impl Condition {
    pub fn new(id: NodeId, left: IndicatorRef, comparator: Comparator, operand: Operand) -> Self {
        Self {
            id,
            left,
            comparator,
            operand,
        }
    }
}

/// Wire form of a condition, as the editor emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionWire {
    id: NodeId,
    left: IndicatorRef,
    comparator: Comparator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right: Option<IndicatorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl TryFrom<ConditionWire> for Condition {
    type Error = ConfigError;

    fn try_from(wire: ConditionWire) -> Result<Self, ConfigError> {
        let operand = match (wire.right, wire.value) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::AmbiguousOperand {
                    node_id: wire.id.to_string(),
                })
            }
            (None, None) => {
                return Err(ConfigError::MissingOperand {
                    node_id: wire.id.to_string(),
                })
            }
            (Some(right), None) => Operand::Indicator(right),
            (None, Some(value)) => Operand::Value(value),
        };
        Ok(Condition {
            id: wire.id,
            left: wire.left,
            comparator: wire.comparator,
            operand,
        })
    }
}

impl From<Condition> for ConditionWire {
    fn from(cond: Condition) -> Self {
        let (right, value) = match cond.operand {
            Operand::Indicator(r) => (Some(r), None),
            Operand::Value(v) => (None, Some(v)),
        };
        ConditionWire {
            id: cond.id,
            left: cond.left,
            comparator: cond.comparator,
            right,
            value,
        }
    }
}

/// Boolean combinator of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicOp {
    And,
    Or,
}

/// Group node: AND/OR over an ordered child list.
///
/// Children order is insertion order. It has no effect on the boolean
/// result but round-trips through serialization unchanged.
///
/// `Drop` unwinds iteratively so arbitrarily deep documents can be
/// freed without blowing the call stack. The derived `Clone` and
/// `PartialEq` still recurse; strategies are read-only during
/// simulation, so deep trees are shared by reference, never cloned
/// or compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: NodeId,
    pub operator: LogicOp,
    pub children: Vec<StrategyNode>,
}

impl Group {
    pub fn new(id: NodeId, operator: LogicOp, children: Vec<StrategyNode>) -> Self {
        Self {
            id,
            operator,
            children,
        }
    }

    /// An empty group. Evaluates to false at every bar.
    pub fn empty(id: NodeId, operator: LogicOp) -> Self {
        Self::new(id, operator, Vec::new())
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        // Flatten descendants into a worklist; each child group is
        // emptied before its own drop runs, so nothing recurses.
        let mut worklist = std::mem::take(&mut self.children);
        while let Some(node) = worklist.pop() {
            if let StrategyNode::Group(mut group) = node {
                worklist.append(&mut group.children);
            }
        }
    }
}

/// One node of the strategy tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StrategyNode {
    Condition(Condition),
    Group(Group),
}

/// The complete strategy document consumed by the engine.
///
/// Created by the (external) editor, read-only here. Never mutated
/// during simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub asset: String,
    pub entry_logic: Group,
    pub exit_logic: Group,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
}
