//! ADCP CLI Client
//!
//! Command-line interface for controlling a Sony projector over ADCP.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use sony_adcp::config::{DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_TIMEOUT_MS};
use sony_adcp::protocol::params::{display_name, INPUT_SOURCES, PICTURE_MODES};
use sony_adcp::protocol::NumericParameter;
use sony_adcp::{Config, ProtocolEngine};
use tracing_subscriber::{fmt, EnvFilter};

/// ADCP CLI
#[derive(Parser, Debug)]
#[command(name = "adcp-cli")]
#[command(about = "Control a Sony projector over ADCP")]
#[command(version)]
struct Args {
    /// Projector host or IP address
    #[arg(short = 'H', long)]
    host: String,

    /// ADCP port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// ADCP password
    #[arg(short = 'P', long, default_value = DEFAULT_PASSWORD)]
    password: String,

    /// Do not answer authentication challenges
    #[arg(long)]
    no_auth: bool,

    /// I/O timeout in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the projector accepts a session
    Check,

    /// Print power, input, blanking, picture mode and picture values
    Status,

    /// Switch the projector on or off
    Power { state: Switch },

    /// Select the input source (e.g. hdmi1)
    Input { source: String },

    /// Blank or unblank the picture
    Blank { state: Switch },

    /// Select the picture mode (e.g. cinema_film1)
    PictureMode { mode: String },

    /// Read a numeric value (e.g. brightness)
    Get { name: String },

    /// Write a numeric value
    Set {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Add a delta to a numeric value, clamped to 0..=100
    Step {
        name: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Simulate a remote-control key (menu, up, down, left, right, enter, reset)
    Key { key: String },

    /// Read, or with a state set, Reality Creation
    RealityCreation { state: Option<String> },

    /// Send a raw command line and print the reply
    Raw { command: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn is_on(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sony_adcp=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .password(&args.password)
        .use_auth(!args.no_auth)
        .timeout_ms(args.timeout_ms)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    tracing::debug!("Using {:?}", config);

    let engine = ProtocolEngine::new(config);
    let succeeded = run(&engine, args.command).await;
    engine.disconnect().await;

    if succeeded {
        ExitCode::SUCCESS
    } else {
        match engine.last_failure() {
            Some(kind) => eprintln!("failed: {}", kind),
            None => eprintln!("failed"),
        }
        ExitCode::FAILURE
    }
}

/// Execute one subcommand, printing its result; returns whether it succeeded
async fn run(engine: &ProtocolEngine, command: Commands) -> bool {
    match command {
        Commands::Check => match ProtocolEngine::validate(engine.config()).await {
            Ok(()) => report_set(true),
            Err(e) => {
                eprintln!("{}", e);
                false
            }
        },
        Commands::Status => status(engine).await,
        Commands::Power { state } => report_set(engine.set_power(state.is_on()).await),
        Commands::Input { source } => report_set(engine.set_input(&source).await),
        Commands::Blank { state } => report_set(engine.set_blank(state.is_on()).await),
        Commands::PictureMode { mode } => report_set(engine.set_picture_mode(&mode).await),
        Commands::Get { name } => report_value(engine.get_numeric_value(&name).await),
        Commands::Set { name, value } => {
            report_set(engine.set_numeric_value(&name, value).await)
        }
        Commands::Step { name, delta } => {
            report_value(engine.step_numeric_value(&name, delta).await)
        }
        Commands::Key { key } => report_set(engine.send_key(&key).await),
        Commands::RealityCreation { state: Some(state) } => {
            report_set(engine.set_reality_creation(&state).await)
        }
        Commands::RealityCreation { state: None } => {
            report_value(engine.get_reality_creation().await)
        }
        Commands::Raw { command } => report_value(engine.send_command(&command).await),
    }
}

async fn status(engine: &ProtocolEngine) -> bool {
    let power = match engine.get_power_state().await {
        Some(power) => power,
        None => return false,
    };
    println!("power: {}", power);

    if !power.is_on() {
        return true;
    }

    // Best effort: a missing field prints as unknown instead of failing
    let input = engine.get_input().await;
    println!("input: {}", labelled(input.as_deref(), INPUT_SOURCES));

    match engine.get_blank_status().await {
        Some(blank) => println!("blank: {}", blank),
        None => println!("blank: unknown"),
    }

    let mode = engine.get_picture_mode().await;
    println!("picture_mode: {}", labelled(mode.as_deref(), PICTURE_MODES));

    for parameter in NumericParameter::ALL {
        match engine.get_numeric_value(parameter.name()).await {
            Some(value) => println!("{}: {}", parameter.name(), value),
            None => println!("{}: unknown", parameter.name()),
        }
    }

    true
}

fn labelled(key: Option<&str>, catalog: &[(&'static str, &'static str)]) -> String {
    match key {
        Some(key) => match display_name(catalog, key) {
            Some(name) => format!("{} ({})", key, name),
            None => key.to_string(),
        },
        None => "unknown".to_string(),
    }
}

fn report_set(ok: bool) -> bool {
    if ok {
        println!("ok");
    }
    ok
}

fn report_value<T: std::fmt::Display>(value: Option<T>) -> bool {
    match value {
        Some(value) => {
            println!("{}", value);
            true
        }
        None => false,
    }
}
