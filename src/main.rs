//! Avalanche CLI
//!
//! Command-line client for the Avalanche dashboard backend:
//! - Log in, register and log out
//! - Watch incoming connection requests
//! - Sample memory, CPU and disk metrics

use anyhow::Context;
use avalanche::charts::{ATTR_FREQUENCY, ATTR_SOURCE, ATTR_TOTAL};
use avalanche::scheduler;
use avalanche::*;
use clap::{Parser, Subcommand, ValueEnum};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "avalanche")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the Avalanche dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config and AVALANCHE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        username: String,
        password: String,
    },

    /// Create an account
    Register {
        username: String,
        password: String,
        /// Password confirmation
        password_repeat: String,
    },

    /// Invalidate the stored session
    Logout,

    /// Show who is logged in
    Status,

    /// List incoming connection requests
    Connections {
        /// Keep polling at the configured interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Sample system metrics (memory, cpu, disk; all when omitted)
    Stats {
        source: Option<String>,
        /// Axis maximum, as a chart's total attribute
        #[arg(long)]
        total: Option<f64>,
        /// Poll frequency in milliseconds
        #[arg(long)]
        frequency_ms: Option<u64>,
        /// Keep polling the source
        #[arg(short, long)]
        watch: bool,
        /// Stop watching after this many polls
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints each chart update as one line per series
struct TerminalSurface {
    format: OutputFormat,
}

impl ChartSurface for TerminalSurface {
    fn render(&mut self, options: &ChartOptions) {
        if self.format == OutputFormat::Table {
            println!("{}", options.no_data.text);
        }
    }

    fn update_options(&mut self, options: &ChartOptions) {
        match self.format {
            OutputFormat::Json => println!("{}", options.to_json()),
            OutputFormat::Table => print_series(options),
        }
    }
}

/// Prints the list each time it changes
struct TerminalConnections {
    format: OutputFormat,
}

impl ConnectionView for TerminalConnections {
    fn replace(&mut self, records: &[ConnectionRecord]) {
        print_connections(records, self.format);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("avalanche={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging);

    let transport = ReqwestTransport::new(&config.api)?;
    let store = FileStorage::new(&config.session.file);
    let auth = AuthClient::new(&transport, store, &config);

    match cli.command {
        Commands::Login { username, password } => {
            let form = LoginForm::new(username, password);
            for feedback in [form.username_feedback(), form.password_feedback()] {
                if feedback.invalid {
                    eprintln!("{}", feedback.message);
                }
            }

            match auth.login(&form, &NoControl).await {
                Ok(_) => {
                    let session = auth.session().current()?.context("session was not stored")?;
                    println!("Logged in as {} ({})", session.username, session.role);
                }
                Err(DashboardError::LoginFailed { status }) => {
                    eprintln!("Login failed ({})", status);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Register {
            username,
            password,
            password_repeat,
        } => {
            let form = RegisterForm::new(username, password, password_repeat);
            if let Err(e) = form.validate() {
                eprintln!("{}", e);
                std::process::exit(1);
            }

            auth.register(&form)
                .await
                .context("Registration failed")?;
            println!("Registered {}. Log in with:", form.username);
            println!("  avalanche login {} <password>", form.username);
        }

        Commands::Logout => match auth.logout().await {
            Ok(_) => println!("Logged out"),
            Err(DashboardError::NotLoggedIn) => println!("Not logged in"),
            Err(e) => {
                eprintln!("Logout failed: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Status => {
            let button = auth.account_button();
            println!("Avalanche v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Backend: {}", transport.base_url());
            println!("Session: {}", config.session.file);
            match auth.session().current()? {
                Some(session) => println!("Account: {} ({})", session.username, session.role),
                None => println!("Account: not logged in"),
            }
            println!("Button:  {}", button.label);
        }

        Commands::Connections { watch } => {
            let poller = ConnectionPoller::new(&transport, &config);
            if watch {
                let mut view = TerminalConnections { format: cli.format };
                scheduler::watch_connections(&poller, &mut view, None).await;
            } else {
                let records = poller
                    .fetch()
                    .await
                    .with_context(|| format!("Cannot fetch connections from {}", transport.base_url()))?;
                print_connections(&records, cli.format);
            }
        }

        Commands::Stats {
            source,
            total,
            frequency_ms,
            watch,
            count,
        } => {
            let controller = ChartController::new(&transport, &config);
            let mut surface = TerminalSurface { format: cli.format };

            match source {
                Some(source) => {
                    let mut element = HashMap::new();
                    element.insert(ATTR_SOURCE.to_string(), source.clone());
                    if let Some(total) = total {
                        element.insert(ATTR_TOTAL.to_string(), total.to_string());
                    }
                    if let Some(ms) = frequency_ms {
                        element.insert(ATTR_FREQUENCY.to_string(), ms.to_string());
                    }

                    let ticks = if watch { count } else { Some(1) };
                    if scheduler::watch_chart(&controller, &element, &mut surface, ticks)
                        .await
                        .is_none()
                    {
                        eprintln!("Unknown data source: {}", source);
                        eprintln!("Known sources: memory, cpu, disk");
                        std::process::exit(1);
                    }
                }
                None => {
                    let updates =
                        join_all(DataSource::ALL.iter().map(|s| controller.fetch_update(*s))).await;
                    for (source, update) in DataSource::ALL.iter().zip(updates) {
                        let mut chart = controller
                            .configure(&[(ATTR_SOURCE, source.as_str())][..])?;
                        match update {
                            Ok(update) => {
                                chart.apply_update(&update);
                                if cli.format == OutputFormat::Table {
                                    println!("[{}]", source);
                                }
                                surface.update_options(chart.options());
                            }
                            Err(e) => eprintln!("[{}] unavailable: {}", source, e),
                        }
                    }
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &config)?;
                println!("Config written to {:?}", path);
            } else {
                println!("{}", config);
            }
        }
    }

    Ok(())
}

fn print_connections(records: &[ConnectionRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(records) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Cannot encode connections: {}", e),
        },
        OutputFormat::Table => {
            println!("{}", connections::LIST_HEADER);
            println!("{}", "-".repeat(40));
            if records.is_empty() {
                println!("(none)");
            }
            for record in records {
                println!("{}", record.id);
            }
            println!();
        }
    }
}

fn print_series(options: &ChartOptions) {
    let format = options.label_format();
    let max = options
        .axis_max()
        .map(|m| format!(" / {}", format.format(m, LabelContext::DataPoint)))
        .unwrap_or_default();

    match &options.series {
        ChartSeries::Named(series) => {
            for s in series {
                match s.latest() {
                    Some(point) => {
                        let at = chrono::DateTime::from_timestamp_millis(point.x)
                            .map(|dt| dt.format("%H:%M:%S").to_string())
                            .unwrap_or_else(|| "-".to_string());
                        println!(
                            "  {:<12} {:>12}{} at {}",
                            s.name,
                            format.format(point.y, LabelContext::DataPoint),
                            max,
                            at
                        );
                    }
                    None => println!("  {:<12} {:>12}", s.name, "-"),
                }
            }
        }
        ChartSeries::Values(values) => {
            let labels = options.labels.clone().unwrap_or_default();
            for (i, value) in values.iter().enumerate() {
                let label = labels.get(i).map(String::as_str).unwrap_or("-");
                println!(
                    "  {:<12} {:>12}{}",
                    label,
                    format.format(*value, LabelContext::DataPoint),
                    max
                );
            }
        }
    }
}
