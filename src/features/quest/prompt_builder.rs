//! SkillQuest prompt construction
//!
//! Turns a [`CourseRequest`] into the system/user pair sent to the model.
//! Both templates are loaded from `prompt/*.md` at compile time.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Challenge list rendered from `CHALLENGES` instead of inline text
//! - 1.1.0: Single-pass placeholder substitution so user text is never re-expanded
//! - 1.0.0: Initial release

use super::CourseRequest;

/// Persona and style mandate; identical for every request
pub const SYSTEM_PROMPT: &str = include_str!("../../../prompt/system.md");

/// Per-request instruction template with `{{name}}` placeholders
const QUEST_TEMPLATE: &str = include_str!("../../../prompt/quest.md");

/// Literal prefix the main heading must start with, followed by the title
pub const HEADING_MARKER: &str = "# ⚔️ Quête : ";

/// Heading of the closing challenges section
pub const CHALLENGES_HEADING: &str = "### 🚀 Tes Défis pour Valider la Compétence";

/// Substituted when the user leaves the outline empty
pub const OUTLINE_PLACEHOLDER: &str =
    "Le joueur n'a pas fourni de structure, tu es libre de proposer la plus pertinente.";

/// One way of validating a competency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub label: &'static str,
    pub description: &'static str,
}

/// The five canonical challenge types, in the order they must appear
pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        label: "Conférence",
        description: "\"Assimiler les connaissances présentées dans cette quête.\"",
    },
    Challenge {
        label: "Atelier",
        description: "Propose 2-3 exercices pratiques pour appliquer les notions.",
    },
    Challenge {
        label: "Autonomie",
        description: "Suggère des problèmes plus complexes ou des ressources externes à explorer seul.",
    },
    Challenge {
        label: "Tutorat",
        description: "\"Prends rendez-vous avec un 'Guide' pour éclaircir un point précis.\"",
    },
    Challenge {
        label: "Examen",
        description: "\"Lorsque tu te sens prêt, inscris-toi à l'examen pour valider cette compétence et remporter tes XP !\".",
    },
];

/// The two conversation turns sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_instruction: String,
    pub user_instruction: String,
}

/// Builds the [`PromptPair`] for a course request
///
/// # Example
///
/// ```ignore
/// let pair = PromptBuilder::new(&request).build();
/// assert!(pair.user_instruction.contains(&request.title));
/// ```
pub struct PromptBuilder<'a> {
    request: &'a CourseRequest,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(request: &'a CourseRequest) -> Self {
        Self { request }
    }

    /// Build the final prompt pair
    pub fn build(self) -> PromptPair {
        let req = self.request;
        let heading = format!("{HEADING_MARKER}{}", req.title);
        let challenges = challenge_lines();
        let outline = req.outline().unwrap_or(OUTLINE_PLACEHOLDER);

        let user_instruction = render_template(
            QUEST_TEMPLATE,
            &[
                ("domain", req.domain.as_str()),
                ("competency", req.competency.as_str()),
                ("title", req.title.as_str()),
                ("keywords", req.keywords.as_str()),
                ("outline", outline),
                ("heading", heading.as_str()),
                ("challenges_heading", CHALLENGES_HEADING),
                ("challenges", challenges.as_str()),
            ],
        );

        PromptPair {
            system_instruction: SYSTEM_PROMPT.to_string(),
            user_instruction,
        }
    }
}

/// Shorthand for `PromptBuilder::new(request).build()`
pub fn build_prompt(request: &CourseRequest) -> PromptPair {
    PromptBuilder::new(request).build()
}

fn challenge_lines() -> String {
    CHALLENGES
        .iter()
        .map(|c| format!("        - **Défi \"{}\" :** {}", c.label, c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `{{key}}` placeholders in one left-to-right pass.
///
/// Substituted values are copied as-is and never scanned again, so user text
/// containing `{{title}}` stays literal. Unknown keys are left untouched.
fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(outline: Option<&str>) -> CourseRequest {
        CourseRequest::new(
            "Mathématiques",
            "Intégrales",
            "L'intégration par parties",
            "calcul, intégration",
            outline.map(String::from),
        )
        .unwrap()
    }

    #[test]
    fn test_build_is_deterministic() {
        let req = sample(Some("1. Intro"));
        assert_eq!(build_prompt(&req), build_prompt(&req));
    }

    #[test]
    fn test_system_instruction_is_constant() {
        let a = build_prompt(&sample(None));
        let b = build_prompt(&CourseRequest::new("Chimie", "Moles", "Avogadro", "mole", None).unwrap());
        assert_eq!(a.system_instruction, b.system_instruction);
        assert!(a.system_instruction.contains("SkillQuest"));
        assert!(a.system_instruction.contains("joueurs"));
    }

    #[test]
    fn test_title_follows_heading_marker() {
        let pair = build_prompt(&sample(None));
        assert!(pair
            .user_instruction
            .contains("# ⚔️ Quête : L'intégration par parties"));
    }

    #[test]
    fn test_missing_outline_uses_placeholder() {
        let pair = build_prompt(&sample(Some("")));
        assert!(pair.user_instruction.contains(OUTLINE_PLACEHOLDER));
    }

    #[test]
    fn test_outline_inserted_verbatim() {
        let outline = "1. Introduction : À quoi ça sert ?\n2. La formule magique";
        let pair = build_prompt(&sample(Some(outline)));
        assert!(pair.user_instruction.contains(outline));
        assert!(!pair.user_instruction.contains(OUTLINE_PLACEHOLDER));
    }

    #[test]
    fn test_all_fields_interpolated() {
        let pair = build_prompt(&sample(None));
        assert!(pair.user_instruction.contains("**Domaine :** Mathématiques"));
        assert!(pair.user_instruction.contains("**Compétence à valider :** Intégrales"));
        assert!(pair
            .user_instruction
            .contains("**Mots-clés pour l'orientation :** calcul, intégration"));
        assert!(!pair.user_instruction.contains("{{"));
    }

    #[test]
    fn test_challenges_listed_in_order() {
        let pair = build_prompt(&sample(None));
        let text = &pair.user_instruction;
        assert!(text.contains(CHALLENGES_HEADING));

        let positions: Vec<usize> = CHALLENGES
            .iter()
            .map(|c| {
                text.find(&format!("**Défi \"{}\" :**", c.label))
                    .unwrap_or_else(|| panic!("missing challenge {}", c.label))
            })
            .collect();
        assert_eq!(positions.len(), 5);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let text = build_prompt(&sample(None)).user_instruction;
        let sections = [
            "Briefing de la Quête",
            "**Objectifs :**",
            "**Prérequis :**",
            "**Récompenses :**",
            "Les Étapes de la Quête",
            CHALLENGES_HEADING,
            "Débriefing de la Quête",
            "Quêtes Annexes",
        ];
        let positions: Vec<usize> = sections.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_user_text_not_reexpanded() {
        let req = CourseRequest::new("{{title}}", "c", "Vrai titre", "k", None).unwrap();
        let text = build_prompt(&req).user_instruction;
        assert!(text.contains("**Domaine :** {{title}}"));
    }

    #[test]
    fn test_render_template_edge_cases() {
        assert_eq!(render_template("a {{x}} b", &[("x", "1")]), "a 1 b");
        assert_eq!(render_template("{{unknown}}", &[("x", "1")]), "{{unknown}}");
        assert_eq!(render_template("open {{x", &[("x", "1")]), "open {{x");
        assert_eq!(render_template("[[note]]", &[]), "[[note]]");
    }
}
