//! Course request captured from the quest form
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Normalise blank outlines to `None`
//! - 1.0.0: Initial release

use thiserror::Error;

/// Rejected form input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Le champ « {0} » est obligatoire")]
    MissingField(&'static str),
}

/// Field labels as shown on the form, reused in validation errors
pub const DOMAIN_LABEL: &str = "Domaine";
pub const COMPETENCY_LABEL: &str = "Compétence à valider";
pub const TITLE_LABEL: &str = "Titre du cours (de la Quête)";
pub const KEYWORDS_LABEL: &str = "Mots-clés";
pub const OUTLINE_LABEL: &str = "Structure du cours (optionnel)";

/// One form submission describing the lesson to generate.
///
/// Every field is opaque free text. `keywords` stays comma-separated and is
/// never split; the model receives it as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRequest {
    pub domain: String,
    pub competency: String,
    pub title: String,
    pub keywords: String,
    pub outline: Option<String>,
}

impl CourseRequest {
    /// Build a request, rejecting blank required fields.
    ///
    /// Values are kept verbatim; only the emptiness check looks at the
    /// trimmed text. A blank outline becomes `None`.
    pub fn new(
        domain: impl Into<String>,
        competency: impl Into<String>,
        title: impl Into<String>,
        keywords: impl Into<String>,
        outline: Option<String>,
    ) -> Result<Self, RequestError> {
        let domain = required(domain.into(), DOMAIN_LABEL)?;
        let competency = required(competency.into(), COMPETENCY_LABEL)?;
        let title = required(title.into(), TITLE_LABEL)?;
        let keywords = required(keywords.into(), KEYWORDS_LABEL)?;
        let outline = outline.filter(|o| !o.trim().is_empty());

        Ok(Self {
            domain,
            competency,
            title,
            keywords,
            outline,
        })
    }

    /// Outline text when the user supplied one
    pub fn outline(&self) -> Option<&str> {
        self.outline.as_deref()
    }
}

fn required(value: String, label: &'static str) -> Result<String, RequestError> {
    if value.trim().is_empty() {
        Err(RequestError::MissingField(label))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(outline: Option<&str>) -> Result<CourseRequest, RequestError> {
        CourseRequest::new(
            "Mathématiques",
            "Intégrales",
            "L'intégration par parties",
            "calcul, intégration",
            outline.map(String::from),
        )
    }

    #[test]
    fn test_valid_request_keeps_fields_verbatim() {
        let req = request(Some("1. Intro\n2. Formule")).unwrap();
        assert_eq!(req.title, "L'intégration par parties");
        assert_eq!(req.keywords, "calcul, intégration");
        assert_eq!(req.outline(), Some("1. Intro\n2. Formule"));
    }

    #[test]
    fn test_blank_outline_becomes_none() {
        assert_eq!(request(Some("")).unwrap().outline, None);
        assert_eq!(request(Some("  \n\t")).unwrap().outline, None);
        assert_eq!(request(None).unwrap().outline, None);
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let err = CourseRequest::new("Physique", "   ", "Titre", "a, b", None).unwrap_err();
        assert_eq!(err, RequestError::MissingField(COMPETENCY_LABEL));
        assert!(err.to_string().contains("Compétence à valider"));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let err = CourseRequest::new("", "", "", "", None).unwrap_err();
        assert_eq!(err, RequestError::MissingField(DOMAIN_LABEL));
    }

    #[test]
    fn test_surrounding_whitespace_preserved() {
        let req = CourseRequest::new(" Chimie ", "Moles", "Quête", "mole", None).unwrap();
        assert_eq!(req.domain, " Chimie ");
    }
}
