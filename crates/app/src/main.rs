use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{BASE_URL_ENV, TIMEOUT_ENV, parse_base_url, parse_timeout_secs};
use services::{AppServices, ClientConfig, Clock, QuizLoopService, StatsService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use url::Url;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn stats(&self) -> Arc<StatsService> {
        self.services.stats()
    }

    fn offline(&self) -> bool {
        self.services.is_offline()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_url: Option<Url>,
    timeout_secs: Option<u64>,
    offline: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--timeout <secs>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::config::DEFAULT_BASE_URL);
    eprintln!("  --timeout {}", services::config::DEFAULT_TIMEOUT_SECS);
    eprintln!();
    eprintln!("  --offline plays the bundled sample questions without a backend.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {BASE_URL_ENV}, {TIMEOUT_ENV}, RUST_LOG");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(&mut args, "--api-url")?;
                    let url = parse_base_url(&value)
                        .map_err(|_| ArgsError::InvalidApiUrl { raw: value.clone() })?;
                    parsed.api_url = Some(url);
                }
                "--timeout" => {
                    let value = require_value(&mut args, "--timeout")?;
                    let secs = parse_timeout_secs(&value)
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    parsed.timeout_secs = Some(secs);
                }
                "--offline" => parsed.offline = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Command-line flags win over the environment.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn build_services(args: &Args, clock: Clock) -> Result<AppServices, Box<dyn std::error::Error>> {
    if args.offline {
        tracing::info!("running offline with the sample question bank");
        return Ok(AppServices::offline(clock));
    }

    let config = args.apply(ClientConfig::from_env()?);
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        "using quiz service"
    );
    Ok(AppServices::from_config(&config, clock)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();
    let services = build_services(&args, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
