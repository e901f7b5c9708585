use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use scout_agents::{AgentLifecycleManager, AgentMessage, Coordinator};
use scout_common::ScoutConfig;
use scout_tools::{ContentFetcher, FetchResult, MockCatalog, MockContentFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Speaker output directory when neither the flag nor the environment sets one
const DEFAULT_SPEECH_DIR: &str = "speech";

/// Command-line arguments for the Scout CLI
#[derive(Parser)]
#[command(
    name = "scout",
    about = "Scout - find, summarize and speak hot subreddit posts"
)]
struct Args {
    /// Enable debug logging
    #[clap(short, long, global = true)]
    debug: bool,

    /// Use canned titles instead of the Reddit API
    #[clap(long, global = true)]
    mock: bool,

    /// Directory for speaker output [default: ./speech]
    #[clap(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch hot post titles from a subreddit
    Hot {
        subreddit: String,

        /// Maximum number of posts
        #[clap(short, long)]
        limit: Option<usize>,
    },
    /// Show canned titles for a subreddit
    Mock { subreddit: String },
    /// List the coordinator's sub-agents
    Agents {
        /// Also print each tool's function-calling declaration
        #[clap(long)]
        schemas: bool,
    },
    /// Send one message to a sub-agent
    Ask {
        /// Sub-agent id, e.g. reddit_scout_agent
        agent: String,

        text: Vec<String>,
    },
}

/// The flag wins over the environment; the CLI never falls back to a
/// temporary directory, since that is removed before the user can read it
fn speech_dir(flag: Option<PathBuf>, configured: Option<PathBuf>) -> PathBuf {
    flag.or(configured).unwrap_or_else(|| PathBuf::from(DEFAULT_SPEECH_DIR))
}

fn print_result(result: &FetchResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn display_agents(coordinator: &Coordinator, schemas: bool) -> Result<()> {
    println!("{}", "🤖 Coordinator sub-agents:".bright_cyan().bold());
    println!();
    for agent in coordinator.sub_agents() {
        let tools = agent.get_available_tools();
        println!(
            "• {} ({}) - {}",
            agent.name().bright_green().bold(),
            agent.agent_id().bright_blue(),
            agent.description()
        );
        if !tools.is_empty() {
            println!("  {} {}", "Tools:".bright_yellow(), tools.join(", ").bright_cyan());
        }
        if schemas {
            for declaration in agent.tool_declarations() {
                println!("{}", serde_json::to_string_pretty(&declaration)?);
            }
        }
    }
    Ok(())
}

async fn ask(coordinator: &mut Coordinator, agent: &str, text: String) -> Result<()> {
    let message = AgentMessage::new_chat(
        "user".to_string(),
        coordinator.agent_id().to_string(),
        text,
    );
    let response = coordinator.delegate(agent, message).await?;
    if response.success {
        println!("{}", response.content);
    } else {
        println!(
            "{}",
            format!(
                "❌ Error: {}",
                response.error.unwrap_or_else(|| "Unknown error".to_string())
            )
            .red()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = ScoutConfig::from_env();
    config.speaker.output_dir = Some(speech_dir(args.output_dir, config.speaker.output_dir.take()));

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Hot { subreddit, .. } if args.mock => {
            let fetcher = MockContentFetcher::new(Arc::new(MockCatalog::builtin()));
            print_result(&fetcher.fetch_mock(&subreddit))?;
        }
        Command::Hot { subreddit, limit } => {
            let fetcher = ContentFetcher::live(&config)?;
            print_result(&fetcher.fetch(&subreddit, limit).await)?;
        }
        Command::Mock { subreddit } => {
            let fetcher = MockContentFetcher::new(Arc::new(MockCatalog::builtin()));
            print_result(&fetcher.fetch_mock(&subreddit))?;
        }
        Command::Agents { schemas } => {
            let (coordinator, scope) = AgentLifecycleManager::from_config(&config, args.mock).await?;
            let shown = display_agents(&coordinator, schemas);
            drop(coordinator);
            scope.release().await?;
            shown?;
        }
        Command::Ask { agent, text } => {
            let (mut coordinator, scope) =
                AgentLifecycleManager::from_config(&config, args.mock).await?;
            info!("Delegating to {}", agent);
            let outcome = ask(&mut coordinator, &agent, text.join(" ")).await;
            drop(coordinator);
            if let Err(e) = scope.release().await {
                error!("Failed to release resources: {}", e);
            }
            outcome?;
        }
    }

    Ok(())
}
