//! Signal evaluation: condition comparisons and the group-tree walk.

pub mod condition;
pub mod tree;

pub use condition::{evaluate_condition, EQ_TOLERANCE};
pub use tree::evaluate_group;
