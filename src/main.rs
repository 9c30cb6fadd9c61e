use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vta::logging::{self, LogDestination};
use vta::qa::FALLBACK_ERROR_MESSAGE;
use vta::submitter::{Effect, Msg, SAMPLE_QUESTIONS, SubmitterState, run_submission, update};
use vta::{AnswerResult, EncodeError, ImageAttachment, QaClient, QaClientBuilder, QaClientTrait};

/// vta - ask the Virtual TA about the TDS course
#[derive(Parser)]
#[command(name = "vta")]
#[command(about = "Ask the Virtual TA questions about the IIT Madras TDS course")]
#[command(version)]
struct Cli {
    /// Query endpoint URL (overrides VTA_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui,
    /// Ask a single question and print the answer
    Ask(AskCommand),
    /// Print the sample questions
    Samples,
}

/// Ask a single question
#[derive(Parser)]
struct AskCommand {
    /// The question to ask
    #[arg(value_name = "QUESTION", required_unless_present = "sample")]
    question: Option<String>,

    /// Image file (or data URL) to send with the question
    #[arg(short, long, value_name = "PATH")]
    image: Option<String>,

    /// Ask sample question N instead (see `vta samples`)
    #[arg(short, long, value_name = "N", conflicts_with = "question", value_parser = parse_sample_number)]
    sample: Option<usize>,

    /// Print the answer as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        None | Some(Commands::Tui) => handle_tui(&cli),
        Some(Commands::Ask(cmd)) => handle_ask(&cli, cmd),
        Some(Commands::Samples) => {
            handle_samples();
            Ok(())
        }
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs endpoint or internal error).
///
/// User errors are an empty question and an image that cannot be attached.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.downcast_ref::<EncodeError>().is_some() || error.to_string().contains("cannot be empty")
}

/// Parses a 1-based sample question number.
fn parse_sample_number(value: &str) -> Result<usize, String> {
    let number: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (1..=SAMPLE_QUESTIONS.len()).contains(&number) {
        Ok(number)
    } else {
        Err(format!(
            "sample number must be between 1 and {}",
            SAMPLE_QUESTIONS.len()
        ))
    }
}

/// Builds the endpoint client, letting `--endpoint` override the environment.
fn build_client(endpoint: Option<&str>) -> Result<QaClient> {
    let mut builder = QaClientBuilder::new();
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint(endpoint);
    }
    builder.build().context("Failed to configure endpoint client")
}

/// Handles the tui command by launching the interactive interface.
fn handle_tui(cli: &Cli) -> Result<()> {
    match vta::utils::get_log_path() {
        Ok(path) => logging::initialize(LogDestination::File(path), logging::level_for(cli.verbose)),
        Err(e) => eprintln!("Warning: {e}, logging disabled"),
    }

    let client = build_client(cli.endpoint.as_deref())?;
    log::info!("using endpoint {}", client.endpoint());

    vta::tui::run(Arc::new(client))
}

/// Handles the ask command by sending one question and printing the answer.
fn handle_ask(cli: &Cli, cmd: &AskCommand) -> Result<()> {
    let destination = if cli.verbose {
        LogDestination::Terminal
    } else {
        LogDestination::Disabled
    };
    logging::initialize(destination, logging::level_for(cli.verbose));

    let question = match (cmd.sample, cmd.question.as_deref()) {
        (Some(number), _) => SAMPLE_QUESTIONS[number - 1].to_string(),
        (None, Some(question)) => question.to_string(),
        (None, None) => String::new(),
    };

    // Validate question is not empty
    if question.is_empty() {
        anyhow::bail!("Question cannot be empty");
    }

    let image = cmd
        .image
        .as_deref()
        .map(ImageAttachment::from_input)
        .transpose()
        .context("Failed to attach image")?;

    let client = build_client(cli.endpoint.as_deref())?;
    log::debug!("using endpoint {}", client.endpoint());

    let answer = execute_ask(&client, question, image)?;

    if cmd.json {
        let json = serde_json::to_string_pretty(&answer).context("Failed to serialize answer")?;
        println!("{json}");
    } else {
        println!("{}", format_answer(&answer));
    }

    Ok(())
}

/// Runs one submission through the reducer with a provided client.
///
/// This function is separated from `handle_ask` to allow testing with mock clients.
fn execute_ask(
    client: &dyn QaClientTrait,
    question: String,
    image: Option<ImageAttachment>,
) -> Result<AnswerResult> {
    let (state, _) = update(SubmitterState::new(), Msg::QuestionChanged(question));
    let (state, _) = update(state, Msg::ImageChanged(image));
    let (mut state, effects) = update(state, Msg::SubmitRequested);

    if effects.is_empty() {
        anyhow::bail!("Question cannot be empty");
    }

    for effect in effects {
        let Effect::Submit { id, input } = effect;
        let outcome = run_submission(client, &input);
        let (next, _) = update(state, Msg::SubmissionFinished { id, outcome });
        state = next;
    }

    if let Some(answer) = state.answer() {
        return Ok(answer.clone());
    }
    anyhow::bail!("{}", state.error().unwrap_or(FALLBACK_ERROR_MESSAGE))
}

/// Formats an answer for plain-text output.
///
/// The references block is only present when the answer has links.
fn format_answer(answer: &AnswerResult) -> String {
    let mut output = answer.answer().to_string();
    if answer.has_links() {
        output.push_str("\n\nReferences:");
        for link in answer.links() {
            output.push_str(&format!("\n  - {} <{}>", link.label(), link.url));
        }
    }
    output
}

/// Handles the samples command by printing the numbered sample questions.
fn handle_samples() {
    for (index, question) in SAMPLE_QUESTIONS.iter().enumerate() {
        println!("{}. {question}", index + 1);
    }
}
