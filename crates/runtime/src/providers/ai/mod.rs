//! Rule-list AI for computer-controlled fighters.
//!
//! An [`AiProfile`](battle_core::AiProfile) is compiled once into a behavior
//! tree: a priority [`Selector`](behavior_tree::Selector) holding one branch per
//! rule, then the fallback action, then "end turn". Each decision snapshots
//! the battle into a [`Blackboard`] and ticks the tree; the first leaf that
//! commits a command wins.
//!
//! A rule branch fires while `hp / max_hp <= hp_threshold`. Inside it the
//! mask switch is tried before the preferred action. Guard-granting actions
//! are skipped off the profile's guard cadence, for rules and fallback alike.

mod blackboard;
mod provider;
mod tree;

pub use blackboard::Blackboard;
pub use provider::AiCommandProvider;
pub use tree::decision_tree;
