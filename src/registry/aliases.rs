//! Static alias tables.
//!
//! Every field name ever observed in stored submissions maps to exactly one
//! canonical key of its stage. Keys are matched exactly first and then on
//! their normalized form (see [`normalize_key`]), so only one spelling of a
//! camelCase/snake_case pair needs to be listed.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::questions::questions_for;
use crate::core::Stage;

pub static IDEA_STAGE_ALIASES: &[(&str, &str)] = &[
    // idea_problem
    ("problem", "idea_problem"),
    ("problem_statement", "idea_problem"),
    ("the_problem", "idea_problem"),
    ("problem_solved", "idea_problem"),
    ("idea_problem_statement", "idea_problem"),
    // idea_solution
    ("solution", "idea_solution"),
    ("proposed_solution", "idea_solution"),
    ("your_solution", "idea_solution"),
    ("idea_solution_description", "idea_solution"),
    // idea_target_market
    ("target_market", "idea_target_market"),
    ("target_customer", "idea_target_market"),
    ("target_customers", "idea_target_market"),
    ("target_audience", "idea_target_market"),
    ("customer_segment", "idea_target_market"),
    ("idea_target_customer", "idea_target_market"),
    // idea_unique_value
    ("unique_value", "idea_unique_value"),
    ("unique_value_proposition", "idea_unique_value"),
    ("uvp", "idea_unique_value"),
    ("usp", "idea_unique_value"),
    ("differentiation", "idea_unique_value"),
    ("what_makes_unique", "idea_unique_value"),
    ("idea_uniqueness", "idea_unique_value"),
    // idea_validation
    ("validation", "idea_validation"),
    ("validation_steps", "idea_validation"),
    ("market_validation", "idea_validation"),
    ("customer_validation", "idea_validation"),
    ("idea_validation_steps", "idea_validation"),
    // idea_team
    ("team", "idea_team"),
    ("team_description", "idea_team"),
    ("team_background", "idea_team"),
    ("co_founders", "idea_team"),
    ("idea_team_members", "idea_team"),
    // idea_motivation
    ("motivation", "idea_motivation"),
    ("why_fellowship", "idea_motivation"),
    ("why_join", "idea_motivation"),
    ("fellowship_motivation", "idea_motivation"),
    ("idea_why_fellowship", "idea_motivation"),
];

pub static EARLY_REVENUE_STAGE_ALIASES: &[(&str, &str)] = &[
    // early_revenue_problem
    ("problem", "early_revenue_problem"),
    ("problem_statement", "early_revenue_problem"),
    ("er_problem", "early_revenue_problem"),
    ("revenue_problem", "early_revenue_problem"),
    ("early_revenue_problem_statement", "early_revenue_problem"),
    // early_revenue_solution
    ("solution", "early_revenue_solution"),
    ("product_solution", "early_revenue_solution"),
    ("product_description", "early_revenue_solution"),
    ("how_product_solves", "early_revenue_solution"),
    ("er_solution", "early_revenue_solution"),
    // early_revenue_customers
    ("paying_customers", "early_revenue_customers"),
    ("customers", "early_revenue_customers"),
    ("customer_base", "early_revenue_customers"),
    ("current_customers", "early_revenue_customers"),
    ("er_customers", "early_revenue_customers"),
    // early_revenue_monetization
    ("monetization", "early_revenue_monetization"),
    ("monetisation", "early_revenue_monetization"),
    ("revenue_model", "early_revenue_monetization"),
    ("business_model", "early_revenue_monetization"),
    ("pricing_model", "early_revenue_monetization"),
    ("er_monetization", "early_revenue_monetization"),
    // early_revenue_traction
    ("traction", "early_revenue_traction"),
    ("current_traction", "early_revenue_traction"),
    ("revenue_to_date", "early_revenue_traction"),
    ("monthly_revenue", "early_revenue_traction"),
    ("mrr", "early_revenue_traction"),
    ("er_traction", "early_revenue_traction"),
    ("early_revenue_metrics", "early_revenue_traction"),
    // early_revenue_competition
    ("competition", "early_revenue_competition"),
    ("competitors", "early_revenue_competition"),
    ("competitive_landscape", "early_revenue_competition"),
    ("competitor_analysis", "early_revenue_competition"),
    ("er_competition", "early_revenue_competition"),
    // early_revenue_growth_plan
    ("growth_plan", "early_revenue_growth_plan"),
    ("growth_strategy", "early_revenue_growth_plan"),
    ("scaling_plan", "early_revenue_growth_plan"),
    ("next_12_months", "early_revenue_growth_plan"),
    ("er_growth", "early_revenue_growth_plan"),
    // early_revenue_funding
    ("funding_use", "early_revenue_funding"),
    ("use_of_funds", "early_revenue_funding"),
    ("fellowship_support", "early_revenue_funding"),
    ("support_needed", "early_revenue_funding"),
    ("er_funding", "early_revenue_funding"),
    ("early_revenue_fellowship_use", "early_revenue_funding"),
];

/// Lookup table for one stage: raw key -> canonical key.
///
/// Canonical keys of the stage's registry always map to themselves.
#[derive(Debug, Clone)]
pub struct AliasTable {
    stage: Stage,
    exact: HashMap<&'static str, &'static str>,
    normalized: HashMap<String, &'static str>,
}

impl AliasTable {
    /// Build a table from alias pairs plus the stage's canonical keys
    pub fn from_entries(stage: Stage, entries: &[(&'static str, &'static str)]) -> Self {
        let canonical = questions_for(stage)
            .iter()
            .map(|q| (q.canonical_key, q.canonical_key));

        let (exact, normalized) = canonical.chain(entries.iter().copied()).fold(
            (HashMap::new(), HashMap::new()),
            |(mut exact, mut normalized), (raw, canonical)| {
                exact.insert(raw, canonical);
                normalized.insert(normalize_key(raw), canonical);
                (exact, normalized)
            },
        );

        Self {
            stage,
            exact,
            normalized,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn lookup(&self, raw_key: &str) -> Option<&'static str> {
        self.exact
            .get(raw_key)
            .copied()
            .or_else(|| self.normalized.get(&normalize_key(raw_key)).copied())
    }

    pub fn contains(&self, raw_key: &str) -> bool {
        self.lookup(raw_key).is_some()
    }

    /// Registered raw spellings for a canonical key, sorted
    pub fn aliases_for(&self, canonical_key: &str) -> Vec<&'static str> {
        let mut aliases: Vec<&'static str> = self
            .exact
            .iter()
            .filter(|(raw, target)| *target == &canonical_key && *raw != &canonical_key)
            .map(|(raw, _)| *raw)
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

pub static IDEA_STAGE_TABLE: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::from_entries(Stage::IdeaStage, IDEA_STAGE_ALIASES));

pub static EARLY_REVENUE_STAGE_TABLE: Lazy<AliasTable> = Lazy::new(|| {
    AliasTable::from_entries(Stage::EarlyRevenueStage, EARLY_REVENUE_STAGE_ALIASES)
});

pub fn table_for(stage: Stage) -> &'static AliasTable {
    match stage {
        Stage::IdeaStage => &*IDEA_STAGE_TABLE,
        Stage::EarlyRevenueStage => &*EARLY_REVENUE_STAGE_TABLE,
    }
}

/// Fold a raw field name into snake_case.
///
/// `problemStatement`, `Problem-Statement`, `problem statement` and
/// `problem__statement` all become `problem_statement`.
pub fn normalize_key(raw_key: &str) -> String {
    let mut out = String::with_capacity(raw_key.len() + 4);
    let mut prev_lower_or_digit = false;

    for ch in raw_key.trim().chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else if ch.is_alphanumeric() {
            out.push(ch);
            prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower_or_digit = false;
        }
    }

    out.trim_matches('_').to_string()
}
