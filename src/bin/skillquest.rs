use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use skillquest::core::Config;
use skillquest::features::generation::{ApiKey, GenerationClient};
use skillquest::features::quest::CourseRequest;
use skillquest::session::{QuestView, Session, MISSING_KEY_WARNING};
use skillquest::ui::form;
use skillquest::ui::{NextAction, TerminalView};

/// Consecutive form failures tolerated before the session ends
const MAX_FORM_FAILURES: u32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!(
        "Starting SkillQuest generator (model {}, endpoint {})",
        config.openai_model, config.openai_base_url
    );

    let client =
        GenerationClient::openai(config.openai_base_url.clone(), config.generation_settings());
    let mut view = TerminalView::new();
    let mut session = Session::new();
    let mut api_key: Option<ApiKey> = None;
    let mut previous: Option<CourseRequest> = None;
    let mut form_failures = 0;

    view.banner();

    loop {
        if api_key.is_none() {
            api_key = form::prompt_api_key()?;
            if api_key.is_none() {
                view.show_warning(MISSING_KEY_WARNING);
                if form::confirm_retry_key()? {
                    continue;
                }
                break;
            }
            info!("API key entered for this session");
        }

        view.section("🎯 Définissez votre Quête Pédagogique");
        let request = match form::prompt_request(previous.as_ref()) {
            Ok(request) => {
                form_failures = 0;
                request
            }
            Err(e) => {
                form_failures += 1;
                error!("Form input failed ({form_failures}/{MAX_FORM_FAILURES}): {e:#}");
                view.show_error(&format!("Saisie interrompue : {e}"));
                session.render(&mut view);
                if form_failures >= MAX_FORM_FAILURES {
                    break;
                }
                continue;
            }
        };

        view.begin_generation();
        let outcome = session
            .submit(&client, api_key.as_ref(), &request, &mut view)
            .await;
        view.end_generation();

        if outcome.invalidates_credential() {
            api_key = None;
        }

        session.render(&mut view);
        previous = Some(request);

        match form::prompt_next_action()? {
            NextAction::NewQuest => {}
            NextAction::ChangeKey => api_key = None,
            NextAction::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}
