use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use classical_catalog_admin::api::{ApiClient, ImageHostClient, ImageUploader};
use classical_catalog_admin::cli::{self, Command};
use classical_catalog_admin::cli_style::{get_styles, print_error, StdinConfirm};
use classical_catalog_admin::config::{self, ImageUploadMode};
use classical_catalog_admin::nav_state::{FileStateStore, MemoryStateStore, StateStore};
use classical_catalog_admin::pages::{AutoConfirm, Confirm, PageContext};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "catalog-admin", styles = get_styles())]
#[command(about = "Curate a classical music catalog: composers, works, recordings and albums")]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Root URL of the catalog backend.
    #[clap(long, env = "CATALOG_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[clap(long)]
    pub request_timeout_sec: Option<u64>,

    /// Limit for the "load everything" lists used to resolve names.
    #[clap(long)]
    pub list_limit: Option<u32>,

    /// Limit for a page's own list.
    #[clap(long)]
    pub page_size: Option<u32>,

    /// Directory keeping navigation state between invocations.
    /// State only lives for one command when omitted.
    #[clap(long, value_parser = parse_path)]
    pub state_dir: Option<PathBuf>,

    /// Where image uploads go.
    #[clap(long, value_enum, default_value_t = ImageUploadMode::Backend)]
    pub image_upload_mode: ImageUploadMode,

    /// Image host account (image-host upload mode).
    #[clap(long, env = "IMAGE_HOST_CLOUD_NAME")]
    pub cloud_name: Option<String>,

    /// Unsigned upload preset (image-host upload mode).
    #[clap(long, env = "IMAGE_HOST_UPLOAD_PRESET")]
    pub upload_preset: Option<String>,

    /// Answer yes to every delete confirmation.
    #[clap(short, long)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            api_url: args.api_url.clone(),
            request_timeout_sec: args.request_timeout_sec,
            list_limit: args.list_limit,
            page_size: args.page_size,
            state_dir: args.state_dir.clone(),
            image_upload_mode: args.image_upload_mode,
            cloud_name: args.cloud_name.clone(),
            upload_preset: args.upload_preset.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  api_url: {}", app_config.api_url);
    info!("  request_timeout_sec: {:?}", app_config.request_timeout_sec);
    info!("  state_dir: {:?}", app_config.state_dir);
    info!("  image_upload: {:?}", app_config.image_upload.mode);

    let api = Arc::new(ApiClient::new(
        app_config.api_url.clone(),
        app_config.request_timeout_sec,
    )?);

    let uploader: Arc<dyn ImageUploader> = match app_config.image_upload.mode {
        ImageUploadMode::Backend => api.clone(),
        ImageUploadMode::ImageHost => Arc::new(ImageHostClient::new(
            app_config.image_upload.cloud_name.clone(),
            app_config.image_upload.upload_preset.clone(),
            app_config.image_upload.folder.clone(),
        )),
    };

    let store: Arc<dyn StateStore> = match &app_config.state_dir {
        Some(dir) => Arc::new(FileStateStore::initialize(dir.clone())?),
        None => Arc::new(MemoryStateStore::new()),
    };

    let confirm: Arc<dyn Confirm> = if cli_args.yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };

    let ctx = PageContext::new(api, store, uploader, confirm)
        .with_limits(app_config.list_limit, app_config.page_size);

    if let Err(err) = cli::run(cli_args.command, ctx, &app_config.api_url).await {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}
