use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use swole_core::{
    ChatError, Completion, CompletionBox, Config, ConfigOverrides, OpenAiClient, Session,
    StagingArea,
};
use swole_term::domain::services::ActionsService;
use swole_term::{destruct_terminal_for_panic, start_loop, StartProps};

#[derive(Parser, Debug)]
#[clap(
    name = "swole",
    version = "0.1.0",
    about = "Chat and pair-programming from the command line"
)]
struct Cli {
    /// Initial prompt. Omit it to go straight to the interactive UI.
    #[clap(trailing_var_arg = true)]
    prompt: Vec<String>,

    /// Stage a file into the context window. Repeatable.
    #[clap(long = "file", short = 'f', value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Model to use.
    #[clap(long, short)]
    model: Option<String>,

    /// API key. Falls back to the OPENAI_API_KEY environment variable.
    #[clap(long, short)]
    key: Option<String>,

    /// Max tokens before old messages are truncated from the context.
    #[clap(long = "max-tokens", short = 't')]
    max_tokens: Option<u32>,

    /// Print one response to stdout and exit, skipping the interactive UI.
    #[clap(long = "single-shot", short = 's')]
    single_shot: bool,

    /// Disable the bodybuilding personality preamble.
    #[clap(long = "no-personality")]
    no_personality: bool,

    /// OpenAI-compatible endpoint to talk to.
    #[clap(long = "api-base", value_name = "URL")]
    api_base: Option<String>,

    #[clap(long = "log-level", default_value = "info")]
    log_level: String,
}

fn exit_code(err: &ChatError) -> i32 {
    match err {
        ChatError::Config(_) => 1,
        ChatError::Network(_) | ChatError::Api { .. } | ChatError::Parsing(_) => 2,
        ChatError::Staging { .. } => 3,
    }
}

fn fail(err: ChatError) -> ! {
    eprintln!("{err}");
    std::process::exit(exit_code(&err));
}

/// Logs go to a file in both modes: the alternate screen owns the terminal,
/// and single-shot stdout carries only the response text.
fn init_logging(log_level: &str) -> Result<()> {
    let log_level_filter = log_level.parse().unwrap_or(LevelFilter::Info);

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("swole.log")?;

    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let overrides = ConfigOverrides {
        api_key: cli.key,
        api_base: cli.api_base,
        model: cli.model,
        max_tokens: cli.max_tokens,
        no_personality: cli.no_personality,
    };
    let config = match Config::from_env(overrides) {
        Ok(config) => config,
        Err(err) => fail(err),
    };

    let prompt = if cli.prompt.is_empty() {
        None
    } else {
        Some(cli.prompt.join(" "))
    };

    let mut staging = StagingArea::new();
    for path in cli.files {
        staging.stage(path);
    }

    if cli.single_shot {
        let Some(prompt) = prompt else {
            fail(ChatError::Config(
                "Single-shot mode requires a prompt".to_string(),
            ));
        };
        if let Err(err) = run_single_shot(&config, &staging, &prompt).await {
            fail(err);
        }
        return Ok(());
    }

    run_interactive(config, staging, prompt).await
}

async fn run_single_shot(
    config: &Config,
    staging: &StagingArea,
    prompt: &str,
) -> Result<(), ChatError> {
    let files = staging.materialize().await?;
    let session = Session::new(config.personality, config.max_tokens);
    let client = OpenAiClient::from_config(config);

    log::info!("Single-shot completion with model {}", config.model);
    let reply = client
        .complete(session.compose(prompt, &files), &config.model)
        .await?;
    println!("{reply}");

    Ok(())
}

async fn run_interactive(
    config: Config,
    staging: StagingArea,
    prompt: Option<String>,
) -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();

    let client: CompletionBox = Box::new(OpenAiClient::from_config(&config));
    let session = Session::new(config.personality, config.max_tokens);

    log::info!("Starting the interactive UI with model {}", config.model);
    let worker_action_tx = action_tx.clone();
    let worker_model = config.model.clone();
    let worker = tokio::spawn(async move {
        ActionsService::start(
            client,
            session,
            worker_model,
            worker_action_tx,
            event_tx,
            &mut action_rx,
        )
        .await
    });

    let props = StartProps {
        model: config.model,
        personality: config.personality,
        staged_files: staging.paths().to_vec(),
        initial_prompt: prompt,
        root: std::env::current_dir()?,
    };

    let ui_result = start_loop(props, action_tx, event_rx).await;

    worker.abort();

    if ui_result.is_err() {
        destruct_terminal_for_panic();
    }

    ui_result
}
