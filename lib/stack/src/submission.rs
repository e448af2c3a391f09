//! Moderation payload for a community stack suggestion

use peptalk_core::{GoalOption, Stack};

pub const SUBMISSION_OPEN_TAG: &str = "[STACK_SUGGESTION_V1]";
pub const SUBMISSION_CLOSE_TAG: &str = "[/STACK_SUGGESTION_V1]";
/// Goal line when the stack has no goal, or its goal has no title
pub const GENERAL_GOAL: &str = "General";

/// Tagged plain-text block moderators read
pub fn submission_text(stack: &Stack, goal_title: Option<&str>) -> String {
    let compounds = stack
        .items
        .iter()
        .map(|c| format!("{} ({})", c.name, c.kind))
        .collect::<Vec<_>>()
        .join(", ");

    [
        SUBMISSION_OPEN_TAG.to_string(),
        format!("Name: {}", stack.name),
        format!("Goal: {}", goal_title.unwrap_or(GENERAL_GOAL)),
        format!("Compounds: {}", compounds),
        SUBMISSION_CLOSE_TAG.to_string(),
    ]
    .join("\n")
}

/// Title of the stack's goal among `goals`, if any
pub fn goal_title<'a>(stack: &Stack, goals: &'a [GoalOption]) -> Option<&'a str> {
    let goal_id = stack.goal_id.as_deref()?;
    goals
        .iter()
        .find(|g| g.goal_id == goal_id)
        .map(|g| g.title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use peptalk_core::{CompoundKind, CompoundOption};

    #[test]
    fn test_submission_block() {
        let mut stack = Stack::new("Morning recovery").with_goal("recovery");
        stack.push(CompoundOption::new("bpc-157", "BPC-157", CompoundKind::Peptide));
        stack.push(CompoundOption::new("wolverine", "Wolverine", CompoundKind::Blend));

        let goals = vec![GoalOption {
            goal_id: "recovery".into(),
            title: "Recovery & Repair".into(),
        }];
        let text = submission_text(&stack, goal_title(&stack, &goals));

        assert_eq!(
            text,
            "[STACK_SUGGESTION_V1]\n\
             Name: Morning recovery\n\
             Goal: Recovery & Repair\n\
             Compounds: BPC-157 (peptide), Wolverine (blend)\n\
             [/STACK_SUGGESTION_V1]"
        );
    }

    #[test]
    fn test_missing_goal_is_general() {
        let stack = Stack::new("Empty").with_goal("unknown");
        let text = submission_text(&stack, goal_title(&stack, &[]));
        assert!(text.contains("\nGoal: General\n"));
        assert!(text.contains("\nCompounds: \n"));
    }
}
