use crate::core::{DiagnosticKind, StrictQuestionnaireResult};
use crate::display::{format_age, format_progress, format_stage, format_word_count};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &[StrictQuestionnaireResult]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &[StrictQuestionnaireResult]) -> anyhow::Result<()> {
        // a single record is written as an object, batches as an array
        let json = match results {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_record(&mut self, result: &StrictQuestionnaireResult) -> anyhow::Result<()> {
        let title = result.record_id.as_deref().unwrap_or("(no id)");
        writeln!(self.writer, "## Application {}", title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Field | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        writeln!(self.writer, "| Stage | {} |", format_stage(result))?;
        writeln!(self.writer, "| Progress | {} |", format_progress(result))?;
        writeln!(self.writer, "| Answer source | {} |", result.source_path)?;
        writeln!(
            self.writer,
            "| Age | {} |",
            format_age(&result.validation_flags.age)
        )?;
        writeln!(self.writer)?;

        for question in &result.questions {
            writeln!(
                self.writer,
                "### {}. {}",
                question.order_index, question.display_text
            )?;
            writeln!(self.writer)?;
            if question.is_answered {
                writeln!(self.writer, "{}", question.answer_text)?;
            } else {
                writeln!(self.writer, "_Not answered_")?;
            }
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "*{}*",
                format_word_count(&question.word_count)
            )?;
            if let Some(evaluation) = &question.evaluation {
                writeln!(self.writer)?;
                writeln!(self.writer, "**AI score:** {:.1}", evaluation.score)?;
            }
            writeln!(self.writer)?;
        }

        if !result.warnings().is_empty() || !result.stage_validation.is_valid {
            writeln!(self.writer, "### Diagnostics")?;
            writeln!(self.writer)?;
            for warning in result.warnings() {
                writeln!(self.writer, "- {:?}: {}", warning.kind, warning.message)?;
            }
            for violation in &result.stage_validation.violations {
                writeln!(
                    self.writer,
                    "- {:?}: {}",
                    DiagnosticKind::ContaminationViolation,
                    violation.message
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, results: &[StrictQuestionnaireResult]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Questionnaire Report")?;
        writeln!(self.writer)?;
        for result in results {
            self.write_record(result)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_record(&mut self, result: &StrictQuestionnaireResult) -> anyhow::Result<()> {
        let title = result.record_id.as_deref().unwrap_or("(no id)");
        writeln!(self.writer, "{}", format!("Application {}", title).bold())?;
        let stage = format_stage(result);
        let stage = if result.detected_stage.is_some() {
            stage.green()
        } else {
            stage.red()
        };
        writeln!(self.writer, "  Stage:    {}", stage)?;
        writeln!(self.writer, "  Progress: {}", format_progress(result))?;
        writeln!(self.writer, "  Source:   {}", result.source_path)?;
        let age = format_age(&result.validation_flags.age);
        let age = if result.validation_flags.age.is_valid {
            age.normal()
        } else {
            age.yellow()
        };
        writeln!(self.writer, "  Age:      {}", age)?;

        for question in &result.questions {
            let marker = if question.is_answered {
                "✓".green()
            } else {
                "·".dimmed()
            };
            writeln!(
                self.writer,
                "  {} {}. {}",
                marker, question.order_index, question.display_text
            )?;
            if question.is_answered {
                writeln!(self.writer, "      {}", question.answer_text)?;
                let words = format_word_count(&question.word_count);
                let words = if question.word_count.is_over_limit() {
                    words.yellow()
                } else {
                    words.dimmed()
                };
                writeln!(self.writer, "      {}", words)?;
            }
            if let Some(evaluation) = &question.evaluation {
                writeln!(self.writer, "      AI score: {:.1}", evaluation.score)?;
            }
        }

        for warning in result.warnings() {
            writeln!(
                self.writer,
                "  {} {:?}: {}",
                "warning".yellow(),
                warning.kind,
                warning.message
            )?;
        }
        for violation in &result.stage_validation.violations {
            writeln!(self.writer, "  {} {}", "violation".red(), violation.message)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &[StrictQuestionnaireResult]) -> anyhow::Result<()> {
        for result in results {
            self.write_record(result)?;
        }
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{AssemblerOptions, QuestionnaireAssembler};
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample() -> StrictQuestionnaireResult {
        let options = AssemblerOptions::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        QuestionnaireAssembler::new(options).assemble(&json!({
            "id": "app-1",
            "product_stage": "idea",
            "date_of_birth": "2001-02-03",
            "answers": { "idea_problem": "Slow permits", "early_revenue_traction": "x" }
        }))
    }

    #[test]
    fn test_json_writer_single_record_is_object() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_results(&[sample()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["detectedStage"], json!("IdeaStage"));
        assert_eq!(value["recordId"], json!("app-1"));
        assert_eq!(value["questions"][0]["answerText"], json!("Slow permits"));
    }

    #[test]
    fn test_json_writer_batch_is_array() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_results(&[sample(), sample()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_markdown_writer_lists_questions_and_violations() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_results(&[sample()])
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("## Application app-1"));
        assert!(text.contains("### 1. What problem does your idea solve?"));
        assert!(text.contains("2 / 300 words"));
        assert!(text.contains("ContaminationViolation"));
        assert!(text.contains("_Not answered_"));
    }

    #[test]
    fn test_terminal_writer_plain() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_results(&[sample()])
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Stage:    Idea Stage (declared)"));
        assert!(text.contains("Age:      23 years (Valid)"));
        assert!(text.contains("violation"));
    }
}
