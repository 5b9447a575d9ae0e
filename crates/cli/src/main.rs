use clap::{Parser, Subcommand};
use parley::actions::{purge_offline_store, Dispatcher};
use parley::api::{Post, ServerClient};
use parley::notification::PushNotification;
use parley::store::{self, Action, Store};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Parley CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config file.
    Init {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Fetch client config and license from the server and print both.
    Config {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Create a post in a channel.
    Post {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        #[arg(long, value_name = "ID")]
        channel: String,

        #[arg(long, short)]
        message: String,

        /// Reply to this thread root.
        #[arg(long, value_name = "ID")]
        root: Option<String>,
    },

    /// Handle a push notification for a channel as if the user tapped it.
    Notify {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        #[arg(long, value_name = "ID")]
        channel: String,

        /// Team of the channel; omit for direct and group messages.
        #[arg(long, value_name = "ID")]
        team: Option<String>,
    },

    /// Search posts in the current team.
    Search {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        terms: String,

        /// Match any term instead of all terms.
        #[arg(long)]
        or: bool,
    },

    /// Clear the offline store.
    Purge {
        /// Config file path (default: PARLEY_CONFIG_PATH or ~/.parley/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let res = match cli.command {
        Some(Commands::Version) => {
            println!("parley {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Init { config }) => run_init(config),
        Some(Commands::Config { config }) => run_config(config).await,
        Some(Commands::Post {
            config,
            channel,
            message,
            root,
        }) => run_post(config, channel, message, root).await,
        Some(Commands::Notify {
            config,
            channel,
            team,
        }) => run_notify(config, channel, team).await,
        Some(Commands::Search { config, terms, or }) => run_search(config, terms, or).await,
        Some(Commands::Purge { config }) => run_purge(config).await,
        None => {
            println!("Run with --help for usage");
            Ok(())
        }
    };

    if let Err(e) = res {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(parley::config::default_config_path);
    let dir = parley::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

/// Loaded config, the dispatcher built from it, and where the store snapshot lives.
struct Client {
    dispatcher: Dispatcher,
    store_path: PathBuf,
}

impl Client {
    async fn open(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let (config, path) = parley::config::load_config(config_path)?;
        parley::init::require_initialized(&path)?;
        let token = parley::config::resolve_server_token(&config);
        let api = ServerClient::new(&config.server.url, token);
        let store_path = parley::config::resolve_store_path(&config, &path);
        let snapshot = store::load_snapshot(&store_path)
            .await
            .map_err(|e| anyhow::anyhow!("reading store {}: {}", store_path.display(), e))?;
        let store = Store::with_state(snapshot);
        if !config.user.id.is_empty() {
            store
                .dispatch(Action::ReceivedCurrentUserId(config.user.id.clone()))
                .await;
        }
        log::info!("using server {}", config.server.url);
        Ok(Self {
            dispatcher: Dispatcher::new(Arc::new(api), store, config.retry),
            store_path,
        })
    }

    async fn save(&self) -> anyhow::Result<()> {
        let state = self.dispatcher.store().state().await;
        store::save_snapshot(&self.store_path, &state)
            .await
            .map_err(|e| anyhow::anyhow!("saving store to {}: {}", self.store_path.display(), e))
    }
}

async fn run_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let client = Client::open(config_path).await?;
    let both = client.dispatcher.load_config_and_license().await?;
    println!("{}", serde_json::to_string_pretty(&both)?);
    client.save().await
}

async fn run_post(
    config_path: Option<PathBuf>,
    channel: String,
    message: String,
    root: Option<String>,
) -> anyhow::Result<()> {
    let client = Client::open(config_path).await?;
    let mut post = Post::draft(channel, message);
    post.root_id = root.unwrap_or_default();
    let res = client.dispatcher.create_post(post).await;
    println!("{}", serde_json::to_string(&res)?);
    if let Some(e) = res.error() {
        anyhow::bail!("post not created: {}", e);
    }
    client.save().await
}

async fn run_notify(
    config_path: Option<PathBuf>,
    channel: String,
    team: Option<String>,
) -> anyhow::Result<()> {
    let client = Client::open(config_path).await?;
    let session = client.dispatcher.store().session().await;
    let notification = PushNotification::new(channel, team);
    let pending = client
        .dispatcher
        .load_from_push_notification(&notification, &session)
        .await?;
    // The process exits after this command, so let the spawned intents land before saving.
    for handle in [pending.team_switch, pending.channel_select]
        .into_iter()
        .flatten()
    {
        let _ = handle.await;
    }
    let session = client.dispatcher.store().session().await;
    println!(
        "team {} channel {}",
        session.current_team_id, session.current_channel_id
    );
    client.save().await
}

async fn run_search(config_path: Option<PathBuf>, terms: String, or: bool) -> anyhow::Result<()> {
    let client = Client::open(config_path).await?;
    let team_id = client.dispatcher.store().session().await.current_team_id;
    if team_id.is_empty() {
        anyhow::bail!("no current team; open a notification for a team channel first");
    }
    client
        .dispatcher
        .search_posts(&team_id, terms.trim(), or)
        .await?;
    let state = client.dispatcher.store().state().await;
    for id in &state.entities.search.results {
        if let Some(post) = state.entities.posts.posts.get(id) {
            println!("{}\t{}\t{}", post.id, post.channel_id, post.message);
        }
    }
    client.save().await
}

async fn run_purge(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let client = Client::open(config_path).await?;
    client.dispatcher.store().dispatch(purge_offline_store()).await;
    println!("offline store purged");
    client.save().await
}
