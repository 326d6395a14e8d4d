//! Console output formatter for finished games

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use twentyq_application::PlayGameOutput;
use twentyq_domain::{Guess, SessionOutcome};

/// Formats game results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete game result
    pub fn format(output: &PlayGameOutput) -> String {
        let outcome = &output.outcome;
        let mut text = String::new();

        text.push_str(&Self::header("Twenty Questions"));
        text.push('\n');

        text.push_str(&format!("{} {}\n", "Guess:".cyan().bold(), Self::guess(outcome)));
        text.push_str(&format!("{} {}\n", "Reason:".cyan().bold(), outcome.reason));
        text.push_str(&format!("{} {}\n", "Questions:".cyan().bold(), outcome.turns));

        if !outcome.transcript.is_empty() {
            text.push_str(&Self::section_header("Transcript"));
            for record in &outcome.transcript {
                let answer = if record.answer { "yes".green() } else { "no".red() };
                text.push_str(&format!(
                    "  Q{}. {}  {}  {}\n",
                    record.turn,
                    record.prompt,
                    answer,
                    format!("({} left)", record.remaining).dimmed()
                ));
            }
        }

        if outcome.remaining.len() > 1 {
            text.push_str(&Self::section_header("Remaining Candidates"));
            let names: Vec<&str> = outcome.remaining.iter().map(|e| e.name()).collect();
            text.push_str(&Self::indent(&names.join(", "), "  "));
            text.push('\n');
        }

        match output.confirmed {
            Some(true) => {
                text.push_str(&format!("\n{}\n", "Confirmed by the player.".green()));
            }
            Some(false) => {
                text.push_str(&format!(
                    "\n{}\n",
                    "The player says that was wrong.".yellow()
                ));
            }
            None => {}
        }

        text.push_str(&Self::footer());
        text
    }

    /// Format as JSON
    pub fn format_json(output: &PlayGameOutput) -> String {
        let mut value = serde_json::to_value(&output.outcome).unwrap_or(serde_json::Value::Null);
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("confirmed".to_string(), serde_json::json!(output.confirmed));
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the guess line only
    pub fn format_summary(output: &PlayGameOutput) -> String {
        let outcome = &output.outcome;
        format!(
            "{} {} {}\n",
            "Guess:".bold(),
            Self::guess(outcome),
            format!("({}, {} questions)", outcome.reason, outcome.turns).dimmed()
        )
    }

    fn guess(outcome: &SessionOutcome) -> String {
        match &outcome.guess {
            Guess::Entity(entity) if outcome.is_exact() => entity.name().green().bold().to_string(),
            Guess::Entity(entity) => entity.name().yellow().bold().to_string(),
            Guess::NoGuessPossible => "no guess possible".red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &PlayGameOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &PlayGameOutput) -> String {
        Self::format_json(output)
    }

    fn format_summary(&self, output: &PlayGameOutput) -> String {
        Self::format_summary(output)
    }
}
