//! Interactive bedtime story generator.
//!
//! Generates stories for children ages 5-10, evaluates each one with
//! deterministic metrics plus an LLM judge, auto-improves drafts that
//! fall short, and loops on reader feedback until the listener is
//! happy. Also runs one-shot via `--request` for scripting.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::{CompletionModel, OpenAi};
use storyloom_common::{load_config, load_toml_value, AppConfig, FileConfig};
use storyloom_engine::{PromptRegistry, QualitativeJudge, StorySession, StoryTeller};

mod display;
mod feedback;

use feedback::FeedbackChoice;

#[derive(Parser)]
#[command(name = "storyloom")]
#[command(about = "Bedtime story generator with quality evaluation")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config/storyloom.toml")]
    config: PathBuf,

    /// Generate one story for this request and exit
    #[arg(short, long)]
    request: Option<String>,

    /// With --request, print the story and evaluation as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("storyloom=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let app = AppConfig::from_env()?;
    let config = load_config(&cli.config)?;
    let config_dir = cli.config.parent().unwrap_or(Path::new("."));
    let toml_value = load_toml_value(&cli.config)?;
    let prompts = PromptRegistry::load(&config, config_dir, &toml_value)?;
    info!(config = %cli.config.display(), "Configuration loaded");

    let mut agent = OpenAi::new(&app.openai_api_key, &config.openai.model);
    if let Some(base_url) = &app.openai_base_url {
        agent = agent.with_base_url(base_url);
    }
    let model: Arc<dyn CompletionModel> = Arc::new(agent);

    let teller = StoryTeller::new(
        model.clone(),
        prompts,
        config.openai.clone(),
        config.categories.clone(),
    );
    let judge = QualitativeJudge::new(
        model,
        config.openai.clone(),
        config.evaluation.default_llm_scores.clone(),
    );
    let session = StorySession::new(teller, judge, &config);

    match &cli.request {
        Some(request) => one_shot(&session, &config, request, cli.json).await,
        None => interactive(&session, &config).await,
    }
}

/// Scripting entry point: one cycle, printed, done.
async fn one_shot(
    session: &StorySession,
    config: &FileConfig,
    request: &str,
    json: bool,
) -> Result<()> {
    let cycle = session.run_cycle(request).await?;

    if json {
        let payload = serde_json::json!({
            "story": cycle.story,
            "category": cycle.category_label(),
            "improved": cycle.improved,
            "evaluation": cycle.evaluation,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        display::story(&cycle.story, "YOUR BEDTIME STORY");
        display::evaluation(&cycle.evaluation, cycle.category_label(), config);
    }
    Ok(())
}

async fn interactive(session: &StorySession, config: &FileConfig) -> Result<()> {
    display::welcome(config);

    loop {
        let request: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("What kind of story would you like to hear?")
            .allow_empty(true)
            .interact_text()?;
        let request = request.trim().to_string();

        if request.is_empty() || request.eq_ignore_ascii_case("quit") {
            println!("\nThank you for using the Bedtime Story Generator! Sweet dreams!");
            break;
        }

        if let Err(e) = run_story_flow(session, config, &request).await {
            eprintln!("{}", style(format!("Story generation failed: {e:#}")).red());
        }
    }
    Ok(())
}

/// One request, through generation and as many feedback rounds as the
/// reader wants.
async fn run_story_flow(
    session: &StorySession,
    config: &FileConfig,
    request: &str,
) -> Result<()> {
    'generate: loop {
        println!("\nGenerating your bedtime story...\n");
        let mut cycle = session.run_cycle(request).await?;
        if cycle.improved {
            println!(
                "{}",
                style("(The first draft fell short of the quality bar and was automatically revised.)")
                    .dim()
            );
        }
        display::story(&cycle.story, "YOUR BEDTIME STORY");
        display::evaluation(&cycle.evaluation, cycle.category_label(), config);

        loop {
            match feedback::prompt()? {
                FeedbackChoice::Keep => {
                    println!("\nGreat! Glad you enjoyed your story!");
                    return Ok(());
                }
                FeedbackChoice::NewStory => {
                    println!("\nLet's create a completely new story...");
                    continue 'generate;
                }
                FeedbackChoice::Modify(feedback) => {
                    println!("\nModifying story based on your feedback...\n");
                    let (story, evaluation) = session
                        .revise(&cycle.story, &feedback, cycle.category.as_ref())
                        .await?;
                    cycle.story = story;
                    cycle.evaluation = evaluation;

                    display::story(&cycle.story, "MODIFIED STORY");
                    display::evaluation(&cycle.evaluation, cycle.category_label(), config);

                    let happy = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt("Are you happy with these changes?")
                        .default(true)
                        .interact()?;
                    if happy {
                        println!("\nPerfect! Enjoy your customized bedtime story!");
                        return Ok(());
                    }
                    // Further rounds start from the modified story.
                    println!("\nLet's try different changes...");
                }
            }
        }
    }
}
