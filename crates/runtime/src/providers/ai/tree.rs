use battle_core::{ActionId, AiProfile, AiRule, Command, MaskId};
use behavior_tree::{Act, Condition, Node, Selector, Sequence};

use super::blackboard::Blackboard;

/// Compiles a profile into its decision tree.
pub fn decision_tree(profile: &AiProfile) -> Selector<Blackboard> {
    let mut root: Selector<Blackboard> = Selector::new(Vec::with_capacity(profile.rules.len() + 2));
    for rule in &profile.rules {
        root.push(rule_branch(rule));
    }
    if let Some(fallback) = &profile.fallback_action {
        root.push(use_action(fallback.clone()));
    }
    root.push(Box::new(Act::new(|board: &mut Blackboard| {
        board.decide(Command::EndTurn);
        true
    })));
    root
}

fn rule_branch(rule: &AiRule) -> Node<Blackboard> {
    let threshold = rule.hp_threshold;
    let mut options = Vec::new();
    if let Some(mask) = &rule.switch_to {
        options.push(switch_mask(mask.clone()));
    }
    if let Some(action) = &rule.preferred_action {
        options.push(use_action(action.clone()));
    }

    let in_range: Node<Blackboard> = Box::new(Condition::new(move |board: &Blackboard| {
        board.hp_ratio() <= threshold
    }));
    let choice: Node<Blackboard> = Box::new(Selector::new(options));
    Box::new(Sequence::new(vec![in_range, choice]))
}

fn switch_mask(mask: MaskId) -> Node<Blackboard> {
    Box::new(Act::new(move |board: &mut Blackboard| {
        if !board.can_switch_to(&mask) {
            return false;
        }
        board.decide(Command::ChangeMask(mask.clone()));
        true
    }))
}

fn use_action(action: ActionId) -> Node<Blackboard> {
    Box::new(Act::new(move |board: &mut Blackboard| {
        if !board.may_use(&action) {
            return false;
        }
        board.decide(Command::UseAction(action.clone()));
        true
    }))
}
