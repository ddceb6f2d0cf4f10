//! Interactive quest form
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Single-line outline when no editor can be launched
//! - 1.1.0: Previous answers become the defaults for the next submission
//! - 1.0.0: Initial release

use std::fmt::Display;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Editor, Input, Password, Select};
use log::warn;

use crate::features::generation::ApiKey;
use crate::features::quest::request::{
    COMPETENCY_LABEL, DOMAIN_LABEL, KEYWORDS_LABEL, OUTLINE_LABEL, TITLE_LABEL,
};
use crate::features::quest::CourseRequest;

pub const DEFAULT_DOMAIN: &str = "Mathématiques Numériques";
pub const DEFAULT_COMPETENCY: &str = "Primitives et Intégrales";
pub const DEFAULT_TITLE: &str = "L'intégration par parties";
pub const DEFAULT_KEYWORDS: &str = "calcul intégral, intégration, fonctions, analyse";

pub const OUTLINE_EXAMPLE: &str = "1. Introduction : À quoi ça sert ?\n\
2. La formule magique et sa démonstration\n\
3. Exemples guidés pas à pas\n\
4. Pièges à éviter et cas particuliers\n\
5. Application concrète";

/// What to do once a round is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    NewQuest,
    ChangeKey,
    Quit,
}

const NEXT_ACTIONS: &[(&str, NextAction)] = &[
    ("✨ Générer une autre Quête", NextAction::NewQuest),
    ("🔑 Changer de clé API", NextAction::ChangeKey),
    ("Quitter", NextAction::Quit),
];

/// Masked credential prompt; blank input returns `None`
pub fn prompt_api_key() -> Result<Option<ApiKey>> {
    let raw = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("🔑 Entrez votre clé API OpenAI")
        .allow_empty_password(true)
        .interact()?;
    Ok(ApiKey::new(raw))
}

/// Ask whether to try entering the key again
pub fn confirm_retry_key() -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Saisir une clé maintenant ?")
        .default(true)
        .interact()?)
}

/// Collect the five quest fields.
///
/// Defaults come from the previous submission, or the example quest on the
/// first round.
pub fn prompt_request(previous: Option<&CourseRequest>) -> Result<CourseRequest> {
    let theme = ColorfulTheme::default();

    let domain = text_field(
        &theme,
        DOMAIN_LABEL,
        previous.map_or(DEFAULT_DOMAIN, |r| r.domain.as_str()),
    )?;
    let competency = text_field(
        &theme,
        COMPETENCY_LABEL,
        previous.map_or(DEFAULT_COMPETENCY, |r| r.competency.as_str()),
    )?;
    let title = text_field(
        &theme,
        TITLE_LABEL,
        previous.map_or(DEFAULT_TITLE, |r| r.title.as_str()),
    )?;
    let keywords = text_field(
        &theme,
        &format!("{KEYWORDS_LABEL} (séparés par des virgules)"),
        previous.map_or(DEFAULT_KEYWORDS, |r| r.keywords.as_str()),
    )?;
    let outline = outline_field(&theme, previous.and_then(CourseRequest::outline))?;

    Ok(CourseRequest::new(domain, competency, title, keywords, outline)?)
}

/// Pick the next step after a round
pub fn prompt_next_action() -> Result<NextAction> {
    let labels: Vec<&str> = NEXT_ACTIONS.iter().map(|(label, _)| *label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Et maintenant ?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(NEXT_ACTIONS
        .get(index)
        .map_or(NextAction::Quit, |(_, action)| *action))
}

fn text_field(theme: &ColorfulTheme, label: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(label)
        .default(default.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Ce champ est obligatoire")
            } else {
                Ok(())
            }
        })
        .interact_text()?)
}

/// Optional multi-line outline, edited in `$EDITOR`
fn outline_field(theme: &ColorfulTheme, previous: Option<&str>) -> Result<Option<String>> {
    let wants_outline = Confirm::with_theme(theme)
        .with_prompt(format!(
            "{OUTLINE_LABEL} : indiquer les chapitres souhaités ? (sinon l'IA décide)"
        ))
        .default(previous.is_some())
        .interact()?;
    if !wants_outline {
        return Ok(None);
    }

    let seed = previous.unwrap_or(OUTLINE_EXAMPLE);
    edit_outline(
        seed,
        |seed| Editor::new().extension(".md").edit(seed),
        || {
            Ok(Input::<String>::with_theme(theme)
                .with_prompt("Chapitres, séparés par « ; »")
                .allow_empty(true)
                .interact_text()?)
        },
    )
}

/// Edit the outline, falling back to one typed line when the editor fails
fn edit_outline<E: Display>(
    seed: &str,
    edit: impl FnOnce(&str) -> std::result::Result<Option<String>, E>,
    single_line: impl FnOnce() -> Result<String>,
) -> Result<Option<String>> {
    let edited = match edit(seed) {
        Ok(edited) => edited,
        Err(e) => {
            warn!("Could not launch an editor for the outline: {e}");
            Some(outline_from_line(&single_line()?))
        }
    };
    Ok(edited.filter(|text| !text.trim().is_empty()))
}

/// `"Intro; Formule"` becomes one chapter per line
fn outline_from_line(line: &str) -> String {
    line.split(';')
        .map(str::trim)
        .filter(|chapter| !chapter.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
