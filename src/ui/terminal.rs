//! Terminal implementation of the quest view

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::time::Duration;

use super::markdown::render_preview;
use crate::core::copy_block;
use crate::session::{GeneratedContent, QuestView};

pub const GENERATING_MESSAGE: &str =
    "Votre 'Guide' IA est en train de forger votre quête... Veuillez patienter...";

/// Writes warnings, errors and results to the terminal
pub struct TerminalView {
    term: Term,
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            spinner: None,
        }
    }

    pub fn banner(&self) {
        self.line(&format!(
            "{}",
            style("⚔️ Générateur de Contenu SkillQuest").bold().cyan()
        ));
        self.line(
            "Cet outil vous aide à créer des contenus de cours au format Markdown, \
             intégrés à la philosophie SkillQuest. Le résultat est optimisé pour Obsidian.",
        );
        self.line("");
    }

    pub fn section(&self, title: &str) {
        self.line("");
        self.line(&format!("{}", style(title).bold()));
    }

    /// Start the spinner shown while the completion is pending
    pub fn begin_generation(&mut self) {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(GENERATING_MESSAGE);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    /// Clear the spinner if it is still running
    pub fn end_generation(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn line(&self, text: &str) {
        if let Err(e) = self.term.write_line(text) {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestView for TerminalView {
    fn show_warning(&mut self, message: &str) {
        self.end_generation();
        self.line(&format!("{} {}", style("⚠").yellow(), style(message).yellow()));
    }

    fn show_error(&mut self, message: &str) {
        self.end_generation();
        self.line(&format!("{} {}", style("✖").red().bold(), style(message).red()));
    }

    fn show_content(&mut self, content: &GeneratedContent) {
        self.end_generation();
        self.section("✅ Votre Quête est prête !");
        self.line(&format!(
            "{}",
            style(format!(
                "{} · {} · {}",
                content.title,
                content.model,
                content.generated_at.format("%Y-%m-%d %H:%M UTC")
            ))
            .dim()
        ));
        self.line(&format!("{}", style("─".repeat(50)).dim()));

        self.section("Aperçu du cours");
        self.line(&render_preview(&content.markdown));
        self.line(&format!("{}", style("─".repeat(50)).dim()));

        self.section("Code Markdown à copier dans Obsidian");
        self.line(&format!(
            "{}",
            style("Sélectionnez le bloc ci-dessous et collez-le dans une nouvelle note Obsidian.")
                .dim()
        ));
        self.line(&copy_block(&content.markdown));
    }
}
