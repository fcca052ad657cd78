use anyhow::Result;
use clap::Parser;
use wishing_star_cli::app;

#[derive(Parser)]
#[command(name = "wishing-star")]
#[command(about = "Wishing Star - chat with Jirachi from the terminal")]
#[command(version)]
struct Cli {
    /// Send a single message and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Numeric id of the user the messages come from
    #[arg(short, long, default_value_t = 0)]
    user_id: u64,

    /// Use the alternate (larger) model tier
    #[arg(long)]
    alternate_model: bool,

    /// Explicit model id, overrides the tier flag
    #[arg(short, long)]
    model: Option<String>,

    /// Environment variable holding the API key
    #[arg(long, env = "WISHING_STAR_API_KEY_ENV")]
    api_key_env: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = wishing_star_core::Settings::load();

    if cli.alternate_model {
        settings.provider.use_alternate_model = true;
    }
    if let Some(model) = cli.model {
        settings.provider.model = Some(model);
    }
    if let Some(env) = cli.api_key_env {
        settings.provider.api_key_env = env;
    }

    let mut gateway = settings.build_gateway()?;
    tracing::info!("Using model {}", gateway.model());

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&mut gateway, cli.user_id, &prompt).await?;
    } else {
        app::run_repl(gateway, cli.user_id).await?;
    }

    Ok(())
}
