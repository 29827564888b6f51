mod plugin_commands;

use {
    clap::{Parser, Subcommand},
    std::path::PathBuf,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "superform", about = "Superform publishing plugins")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (overrides discovery of ./superform.toml and friends).
    #[arg(long, global = true, env = "SUPERFORM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered plugins and their field lists.
    Plugins,
    /// Render the configuration view of a channel.
    Configure {
        /// Plugin module (e.g. "linkedin").
        module: String,
        #[arg(long)]
        channel_id: String,
        #[arg(long, default_value = "")]
        channel_name: String,
    },
    /// Exchange a LinkedIn authorization code for an access token.
    ExchangeCode {
        /// Code received on the authorization callback.
        code: String,
    },
    /// Publish a publication through one plugin.
    Publish {
        /// Plugin module (e.g. "wiki").
        module: String,
        /// JSON file holding the publication.
        #[arg(long)]
        publication: PathBuf,
        /// Stored channel config, as a JSON string.
        #[arg(long, default_value = "{}")]
        channel_config: String,
    },
}

/// Initialise tracing. Events go to stderr so command output on stdout
/// stays machine-readable.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_settings(cli: &Cli) -> superform_config::SuperformSettings {
    match cli.config {
        Some(ref path) => {
            let mut settings = superform_config::load_or_default(path);
            superform_config::apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
            settings
        },
        None => superform_config::discover_and_load(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "superform starting");

    let settings = load_settings(&cli);
    let plugins = plugin_commands::Plugins::from_settings(&settings)?;

    match cli.command {
        Commands::Plugins => plugin_commands::list(&plugins),
        Commands::Configure {
            module,
            channel_id,
            channel_name,
        } => plugin_commands::configure(&plugins, &module, &channel_id, &channel_name),
        Commands::ExchangeCode { code } => plugin_commands::exchange_code(&plugins, &code).await,
        Commands::Publish {
            module,
            publication,
            channel_config,
        } => {
            let published =
                plugin_commands::publish(&plugins, &module, &publication, &channel_config).await?;
            if !published {
                std::process::exit(1);
            }
            Ok(())
        },
    }
}
