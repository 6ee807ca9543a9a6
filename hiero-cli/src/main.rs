mod agent;
mod config;
mod output;
mod service;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use hiero_client::{HieroClient, WalletSigner};
use hiero_protocol::{PaginationParams, SortOrder};
use std::path::PathBuf;
use tracing::info;

use config::{CliConfig, PRIVATE_KEY_ENV};

#[derive(Parser)]
#[command(name = "hiero")]
#[command(about = "Manage agents and services on a Hiero API with wallet-signed requests")]
struct Args {
    /// TOML file with base_url and private_key
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wallet address derived from the private key
    Address,
    /// Sign a message the way request bodies are signed
    Sign {
        /// Message to sign
        message: String,
    },
    /// Manage agents
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },
    /// Manage services
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// Create an agent from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Get an agent
    Get {
        /// Agent ID
        id: String,
    },
    /// Update an agent with a partial JSON body
    Update {
        /// Agent ID
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,
    },
    /// List agents owned by this wallet
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Generate an agent configuration from a description
    Generate {
        /// Natural language specification
        specification: String,
    },
    /// Run inference on an agent
    Infer {
        /// Agent ID
        id: String,
        /// Input text
        input: String,
        /// Conversation thread
        #[arg(long)]
        thread_id: String,
    },
}

#[derive(Subcommand)]
enum ServiceAction {
    /// Create a service from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Get a service
    Get {
        /// Service ID
        id: String,
    },
    /// Update a service with a partial JSON body
    Update {
        /// Service ID
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Search services
    Search {
        /// Free text query
        #[arg(long)]
        q: Option<String>,
        /// Maximum price
        #[arg(long)]
        max_price: Option<f64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Request an access token for a service
    Authorize {
        /// Service ID
        id: String,
        /// Signature proving the caller may use the service
        #[arg(long)]
        signature: String,
    },
}

#[derive(ClapArgs)]
struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long, value_enum)]
    sort_order: Option<SortArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<PageArgs> for PaginationParams {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            sort_by: args.sort_by,
            sort_order: args.sort_order.map(|order| match order {
                SortArg::Asc => SortOrder::Asc,
                SortArg::Desc => SortOrder::Desc,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let config = CliConfig::load(path)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load config file {:?}: {}", path, e))?;
            info!("Loaded config from {:?}", path);
            config
        }
        None => CliConfig::default(),
    };
    let env_key = std::env::var(PRIVATE_KEY_ENV).ok();

    match args.command {
        Commands::Address => {
            let signer = WalletSigner::from_private_key(&config.private_key(env_key)?)?;
            println!("{}", signer.address());
        }
        Commands::Sign { message } => {
            let signer = WalletSigner::from_private_key(&config.private_key(env_key)?)?;
            println!("{}", signer.sign_message(message.as_bytes())?);
        }
        Commands::Agent { action } => {
            let client = HieroClient::new(&config.client_config(args.base_url, env_key)?)?;
            agent::handle_agent_command(&client, action).await?
        }
        Commands::Service { action } => {
            let client = HieroClient::new(&config.client_config(args.base_url, env_key)?)?;
            service::handle_service_command(&client, action).await?
        }
    }

    Ok(())
}
