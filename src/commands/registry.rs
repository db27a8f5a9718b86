use crate::core::Stage;
use crate::registry::questions_for;
use crate::resolver::AliasResolver;
use std::fmt::Write;

/// Render each stage's questions with the aliases that resolve to them
pub fn render_registry(stage: Option<Stage>) -> String {
    let resolver = AliasResolver::standard();
    let stages: &[Stage] = match &stage {
        Some(stage) => std::slice::from_ref(stage),
        None => &Stage::ALL,
    };

    let mut out = String::new();
    for stage in stages {
        let _ = writeln!(out, "{}", stage);
        for question in questions_for(*stage) {
            let _ = writeln!(
                out,
                "  {}. {} [{}]",
                question.order_index, question.display_text, question.canonical_key
            );
            let aliases: Vec<_> = resolver
                .table(*stage)
                .aliases_for(question.canonical_key);
            if !aliases.is_empty() {
                let _ = writeln!(out, "     aliases: {}", aliases.join(", "));
            }
        }
        let _ = writeln!(out);
    }
    out
}

pub fn print_registry(stage: Option<Stage>) {
    print!("{}", render_registry(stage));
}
