//! The fixed question registry for both stages.
//!
//! This is the only legitimate source of canonical keys. Ordering within a
//! stage is the order questions are presented in.

use crate::core::{QuestionDefinition, Stage};

const fn question(
    canonical_key: &'static str,
    display_text: &'static str,
    stage: Stage,
    order_index: usize,
) -> QuestionDefinition {
    QuestionDefinition {
        canonical_key,
        display_text,
        stage,
        order_index,
    }
}

pub static IDEA_STAGE_QUESTIONS: &[QuestionDefinition] = &[
    question(
        "idea_problem",
        "What problem does your idea solve?",
        Stage::IdeaStage,
        1,
    ),
    question(
        "idea_solution",
        "What is your proposed solution?",
        Stage::IdeaStage,
        2,
    ),
    question(
        "idea_target_market",
        "Who is your target customer?",
        Stage::IdeaStage,
        3,
    ),
    question(
        "idea_unique_value",
        "What makes your idea unique?",
        Stage::IdeaStage,
        4,
    ),
    question(
        "idea_validation",
        "How have you validated your idea so far?",
        Stage::IdeaStage,
        5,
    ),
    question(
        "idea_team",
        "Tell us about your team.",
        Stage::IdeaStage,
        6,
    ),
    question(
        "idea_motivation",
        "Why do you want to join the fellowship?",
        Stage::IdeaStage,
        7,
    ),
];

pub static EARLY_REVENUE_STAGE_QUESTIONS: &[QuestionDefinition] = &[
    question(
        "early_revenue_problem",
        "What problem does your idea solve?",
        Stage::EarlyRevenueStage,
        1,
    ),
    question(
        "early_revenue_solution",
        "How does your product solve it?",
        Stage::EarlyRevenueStage,
        2,
    ),
    question(
        "early_revenue_customers",
        "Who are your paying customers?",
        Stage::EarlyRevenueStage,
        3,
    ),
    question(
        "early_revenue_monetization",
        "How does your venture make money?",
        Stage::EarlyRevenueStage,
        4,
    ),
    question(
        "early_revenue_traction",
        "What traction have you achieved so far?",
        Stage::EarlyRevenueStage,
        5,
    ),
    question(
        "early_revenue_competition",
        "Who are your main competitors?",
        Stage::EarlyRevenueStage,
        6,
    ),
    question(
        "early_revenue_growth_plan",
        "How do you plan to grow over the next 12 months?",
        Stage::EarlyRevenueStage,
        7,
    ),
    question(
        "early_revenue_funding",
        "How will you use the fellowship support?",
        Stage::EarlyRevenueStage,
        8,
    ),
];

/// Question definitions of a stage in presentation order
pub fn questions_for(stage: Stage) -> &'static [QuestionDefinition] {
    match stage {
        Stage::IdeaStage => IDEA_STAGE_QUESTIONS,
        Stage::EarlyRevenueStage => EARLY_REVENUE_STAGE_QUESTIONS,
    }
}

pub fn all_questions() -> impl Iterator<Item = &'static QuestionDefinition> {
    IDEA_STAGE_QUESTIONS
        .iter()
        .chain(EARLY_REVENUE_STAGE_QUESTIONS.iter())
}

pub fn definition(canonical_key: &str) -> Option<&'static QuestionDefinition> {
    all_questions().find(|q| q.canonical_key == canonical_key)
}

/// Stage owning a canonical key, `None` for anything not in the registry
pub fn stage_of(canonical_key: &str) -> Option<Stage> {
    definition(canonical_key).map(|q| q.stage)
}

pub fn is_canonical_key(canonical_key: &str, stage: Stage) -> bool {
    stage_of(canonical_key) == Some(stage)
}
