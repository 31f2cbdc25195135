//! Strategy documents: indicator references, the condition/group tree,
//! extraction and validation.

pub mod extract;
pub mod indicator_ref;
pub mod node;

pub use extract::{extract_indicators, uses_usd_inr, validate_strategy};
pub use indicator_ref::{IndicatorKey, IndicatorKind, IndicatorRef};
pub use node::{Comparator, Condition, Group, LogicOp, Operand, Strategy, StrategyNode};
