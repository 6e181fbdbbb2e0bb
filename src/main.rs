use clap::Parser;
use tecsql::{config, server};

/// TecSql - logical-SQL translation service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTTP server host address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP server port
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Maximum accepted query length in bytes
    #[arg(long, default_value_t = 65536)]
    max_query_len: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    /// Directory for persisted history files
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Load configuration from a YAML file instead of CLI flags
    #[arg(long)]
    config_file: Option<String>,
}

impl From<Cli> for config::CliConfig {
    fn from(cli: Cli) -> Self {
        config::CliConfig {
            http_host: cli.host,
            http_port: cli.port,
            max_query_len: cli.max_query_len,
            request_timeout_secs: cli.request_timeout_secs,
            data_dir: cli.data_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    println!("\nTecSql v{}\n", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config_file {
        Some(path) => config::ServerConfig::from_yaml_file(path),
        None => config::ServerConfig::from_cli(cli.into()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    server::run_with_config(config).await;
}
