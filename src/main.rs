//! CLI entry point for `headerorder`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use headerorder::config::{self, Config};
use headerorder::model::header::{DisplayStyle, HeaderOrder};
use headerorder::render::view::HeaderView;
use headerorder::store::reader::MessageStore;

#[derive(Parser)]
#[command(
    name = "headerorder",
    version,
    about = "Show email headers in a fixed, user-chosen order"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the standard location
    #[arg(long, global = true, value_name = "FILE", env = config::CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headers of one message
    Show {
        /// MBOX or EML file
        path: PathBuf,
        /// Message number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        message: usize,
        /// Show every header in arrival order
        #[arg(long)]
        full: bool,
        /// Comma-separated field order, overriding the config
        #[arg(long, value_name = "FIELDS")]
        order: Option<String>,
        /// Comma-separated fields to hide (uses the legacy filter)
        #[arg(long, value_name = "FIELDS")]
        ignore: Option<String>,
        /// Turn reordering off for this run
        #[arg(long, conflicts_with = "order")]
        no_reorder: bool,
        /// Also print the message body
        #[arg(long)]
        body: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Count the messages in a file
    Count {
        path: PathBuf,
    },
    /// Print the effective configuration, or write the defaults
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file with --init
        #[arg(short, long, requires = "init")]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Show {
            path,
            message,
            full,
            order,
            ignore,
            no_reorder,
            body,
            json,
        } => {
            let options = ShowOptions {
                message,
                full,
                order,
                ignore,
                no_reorder,
                body,
                json,
            };
            cmd_show(&config, &path, &options)
        }
        Commands::Count { path } => cmd_count(&path),
        Commands::Config { init, force } => cmd_config(&config, cli.config.as_deref(), init, force),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_path = config::log_file_path(config);
    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_name = log_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "headerorder.log".into());
        let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

struct ShowOptions {
    message: usize,
    full: bool,
    order: Option<String>,
    ignore: Option<String>,
    no_reorder: bool,
    body: bool,
    json: bool,
}

/// Render the headers of one message through the header view.
fn cmd_show(config: &Config, path: &Path, options: &ShowOptions) -> anyhow::Result<()> {
    if options.message == 0 {
        anyhow::bail!("Message numbers start at 1");
    }
    let store = MessageStore::open(path)?;
    if store.is_empty() {
        anyhow::bail!("No messages in {}", store.path().display());
    }
    let index = options.message - 1;
    let region = store.region(index)?;

    let mut view = HeaderView::from_config(&config.headers);
    if let Some(order) = &options.order {
        view.install_reorder(HeaderOrder::from_csv(order));
    }
    if options.no_reorder {
        view.remove_reorder();
    }

    let style = if options.full {
        DisplayStyle::Full
    } else {
        config.headers.style
    };
    let ignored = options.ignore.as_deref().map(split_list);

    let headers = view.render(store.text(), region, style, ignored.as_deref())?;
    let body = if options.body {
        Some(store.body(index)?)
    } else {
        None
    };

    if options.json {
        let output = serde_json::json!({
            "file": store.path().to_string_lossy(),
            "message": options.message,
            "message_count": store.len(),
            "style": style,
            "order": view.order(),
            "headers": headers,
            "body": body,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{headers}");
        if let Some(body) = body {
            println!();
            print!("{body}");
        }
    }

    Ok(())
}

/// Print the number of messages in a file.
fn cmd_count(path: &Path) -> anyhow::Result<()> {
    let store = MessageStore::open(path)?;
    println!("{}", store.len());
    Ok(())
}

/// Print the effective configuration, or write the default one.
fn cmd_config(
    config: &Config,
    explicit_path: Option<&Path>,
    init: bool,
    force: bool,
) -> anyhow::Result<()> {
    if !init {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => config::config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?,
    };
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    config::save_config_to(&Config::default(), &path)?;
    println!("  Wrote default config to {}", path.display());
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "headerorder", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Split a comma-separated field list, dropping empty items.
fn split_list(list: &str) -> Vec<String> {
    HeaderOrder::from_csv(list).names().to_vec()
}
