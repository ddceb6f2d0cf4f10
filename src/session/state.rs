//! # Session State
//!
//! Holds the most recent generated course and the Idle/Generating/Ready
//! state machine for one interactive session.

use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::features::generation::{ApiKey, GenerationClient, GenerationFailure};
use crate::features::quest::CourseRequest;

/// Shown when the user submits without a credential
pub const MISSING_KEY_WARNING: &str =
    "Veuillez entrer votre clé API OpenAI pour commencer.";

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing generated yet
    Idle,
    /// Waiting on the completion service
    Generating,
    /// Content available for preview and copy
    Ready,
}

/// Text returned by the model, kept until the next successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub markdown: String,
    pub title: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// Result of one form submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Generated,
    Failed(GenerationFailure),
    MissingCredential,
}

impl Submission {
    /// A rejected key must not be reused; every other outcome keeps it
    pub fn invalidates_credential(&self) -> bool {
        matches!(self, Submission::Failed(GenerationFailure::Authentication(_)))
    }
}

/// Output sink for the session
pub trait QuestView {
    fn show_warning(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    fn show_content(&mut self, content: &GeneratedContent);
}

/// Per-session state owned by the interaction loop
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    content: Option<GeneratedContent>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            state: SessionState::Idle,
            content: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        self.content.as_ref()
    }

    /// Run one submission to completion.
    ///
    /// Content is replaced only on success. A failure shows exactly one
    /// error and leaves any earlier content in place.
    pub async fn submit(
        &mut self,
        client: &GenerationClient,
        api_key: Option<&ApiKey>,
        request: &CourseRequest,
        view: &mut dyn QuestView,
    ) -> Submission {
        let Some(api_key) = api_key else {
            warn!("Submission ignored: no API key entered");
            view.show_warning(MISSING_KEY_WARNING);
            return Submission::MissingCredential;
        };

        let request_id = Uuid::new_v4();
        self.state = SessionState::Generating;

        match client.generate(request_id, api_key, request).await {
            Ok(markdown) => {
                self.content = Some(GeneratedContent {
                    markdown,
                    title: request.title.clone(),
                    model: client.settings().model.clone(),
                    generated_at: Utc::now(),
                });
                self.state = SessionState::Ready;
                info!("[{request_id}] Session content updated");
                Submission::Generated
            }
            Err(failure) => {
                view.show_error(&failure.user_message());
                self.state = self.resting_state();
                if self.content.is_some() {
                    info!("[{request_id}] Keeping previously generated content");
                }
                Submission::Failed(failure)
            }
        }
    }

    /// Display the current content, if any
    pub fn render(&self, view: &mut dyn QuestView) {
        if let Some(content) = &self.content {
            view.show_content(content);
        }
    }

    fn resting_state(&self) -> SessionState {
        if self.content.is_some() {
            SessionState::Ready
        } else {
            SessionState::Idle
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generation::client::testing::ScriptedBackend;
    use crate::features::generation::GenerationSettings;

    #[derive(Default)]
    struct RecordingView {
        warnings: Vec<String>,
        errors: Vec<String>,
        shown: Vec<String>,
    }

    impl QuestView for RecordingView {
        fn show_warning(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn show_content(&mut self, content: &GeneratedContent) {
            self.shown.push(content.markdown.clone());
        }
    }

    fn request() -> CourseRequest {
        CourseRequest::new(
            "Mathématiques Numériques",
            "Primitives et Intégrales",
            "L'intégration par parties",
            "calcul intégral, intégration",
            None,
        )
        .unwrap()
    }

    fn client(backend: &ScriptedBackend) -> GenerationClient {
        GenerationClient::new(Box::new(backend.clone()), GenerationSettings::default())
    }

    fn key() -> ApiKey {
        ApiKey::new("sk-test").unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.content().is_none());
    }

    #[tokio::test]
    async fn test_success_moves_to_ready() {
        let backend = ScriptedBackend::new(vec![Ok(Some("# Quête".to_string()))]);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        let outcome = session
            .submit(&client(&backend), Some(&key()), &request(), &mut view)
            .await;

        assert_eq!(outcome, Submission::Generated);
        assert_eq!(session.state(), SessionState::Ready);
        let content = session.content().unwrap();
        assert_eq!(content.markdown, "# Quête");
        assert_eq!(content.model, "gpt-4o");
        assert_eq!(content.title, "L'intégration par parties");
        assert!(view.errors.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_warns_without_calling_service() {
        let backend = ScriptedBackend::new(vec![Ok(Some("unused".to_string()))]);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        let outcome = session
            .submit(&client(&backend), None, &request(), &mut view)
            .await;

        assert_eq!(outcome, Submission::MissingCredential);
        assert_eq!(backend.calls(), 0);
        assert_eq!(view.warnings, vec![MISSING_KEY_WARNING.to_string()]);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_failure_shows_exactly_one_error() {
        let rejection = "Incorrect API key provided: sk-test.";
        let backend =
            ScriptedBackend::new(vec![Err(GenerationFailure::from_message(rejection))]);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        let outcome = session
            .submit(&client(&backend), Some(&key()), &request(), &mut view)
            .await;

        assert!(matches!(outcome, Submission::Failed(GenerationFailure::Authentication(_))));
        assert_eq!(view.errors.len(), 1);
        assert!(view.errors[0].contains(rejection));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.content().is_none());
    }

    #[tokio::test]
    async fn test_failed_resubmission_keeps_content() {
        let backend = ScriptedBackend::new(vec![
            Ok(Some("première quête".to_string())),
            Err(GenerationFailure::from_message("Rate limit reached for gpt-4o")),
        ]);
        let client = client(&backend);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        session.submit(&client, Some(&key()), &request(), &mut view).await;
        let outcome = session.submit(&client, Some(&key()), &request(), &mut view).await;

        assert!(matches!(outcome, Submission::Failed(GenerationFailure::RateLimited(_))));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.content().unwrap().markdown, "première quête");
        assert_eq!(view.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_successful_resubmission_overwrites() {
        let backend = ScriptedBackend::new(vec![
            Ok(Some("v1".to_string())),
            Ok(Some("v2".to_string())),
        ]);
        let client = client(&backend);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        session.submit(&client, Some(&key()), &request(), &mut view).await;
        session.submit(&client, Some(&key()), &request(), &mut view).await;

        assert_eq!(session.content().unwrap().markdown, "v2");
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_render_only_with_content() {
        let backend = ScriptedBackend::new(vec![Ok(Some("contenu".to_string()))]);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        session.render(&mut view);
        assert!(view.shown.is_empty());

        session
            .submit(&client(&backend), Some(&key()), &request(), &mut view)
            .await;
        session.render(&mut view);
        assert_eq!(view.shown, vec!["contenu".to_string()]);
    }

    #[tokio::test]
    async fn test_only_rejected_key_is_invalidated() {
        let backend = ScriptedBackend::new(vec![
            Ok(Some("# Quête".to_string())),
            Err(GenerationFailure::from_message(
                "Rate limit reached for gpt-4o in organization org-abc on tokens per min (TPM): \
                 Limit 30000, Used 24010, Requested 6401. Please try again in 1.2s.",
            )),
            Err(GenerationFailure::from_message(
                "Incorrect API key provided: sk-test. You can find your API key at https://platform.openai.com/account/api-keys.",
            )),
        ]);
        let client = client(&backend);
        let mut session = Session::new();
        let mut view = RecordingView::default();

        let generated = session.submit(&client, Some(&key()), &request(), &mut view).await;
        assert!(!generated.invalidates_credential());

        let throttled = session.submit(&client, Some(&key()), &request(), &mut view).await;
        assert!(matches!(throttled, Submission::Failed(GenerationFailure::RateLimited(_))));
        assert!(!throttled.invalidates_credential());

        let rejected = session.submit(&client, Some(&key()), &request(), &mut view).await;
        assert!(rejected.invalidates_credential());
        assert_eq!(session.content().unwrap().markdown, "# Quête");

        let missing = session.submit(&client, None, &request(), &mut view).await;
        assert!(!missing.invalidates_credential());
    }
}
