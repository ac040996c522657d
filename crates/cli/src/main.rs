//! Buildtask CLI - host architecture and parameter inspection
//! Composition root: wires core services to the system adapters

mod task;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use buildtask_core::application::ArchitectureProbe;
use buildtask_core::domain::{HostArchitecture, ParameterKind, ParameterValue};
use buildtask_core::port::ArchitectureQuery;
use buildtask_infra_system::{SysinfoArchitectureQuery, TracingBuildEngine};

const DEFAULT_LOG_FILTER: &str = "buildtask=info";

#[derive(Parser)]
#[command(name = "buildtask")]
#[command(about = "Buildtask runtime CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log output format
    #[arg(long, env = "BUILDTASK_LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the architecture of the current process
    Arch {
        /// Probe even when the host family has no native query
        #[arg(long, env = "BUILDTASK_PROBE_ANY_HOST")]
        any_host: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a typed parameter, falling back to a default
    Param {
        /// JSON object of parameters to load first
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Extra assignment, parsed as --kind (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,

        /// Parameter name
        #[arg(short, long)]
        key: String,

        /// Parameter type
        #[arg(long, value_enum, default_value = "string")]
        kind: KindArg,

        /// Value returned when the parameter is not set
        #[arg(short, long)]
        default: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Bool,
    Int,
    String,
    StringArray,
}

impl From<KindArg> for ParameterKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bool => ParameterKind::Bool,
            KindArg::Int => ParameterKind::Int,
            KindArg::String => ParameterKind::String,
            KindArg::StringArray => ParameterKind::StringArray,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.log_format)?;
    info!("Buildtask v{} starting...", buildtask_core::VERSION);

    // Event sink shared by every task in this process
    let engine = Arc::new(TracingBuildEngine::new());

    match cli.command {
        Commands::Arch { any_host, json } => run_arch(engine.clone(), any_host, json)?,
        Commands::Param {
            file,
            assignments,
            key,
            kind,
            default,
            json,
        } => run_param(
            engine.clone(),
            file,
            &assignments,
            &key,
            kind.into(),
            &default,
            json,
        )?,
    }

    if engine.error_count() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    // Logs go to stderr so stdout stays machine-readable
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

fn run_arch(engine: Arc<TracingBuildEngine>, any_host: bool, json: bool) -> Result<()> {
    let query: Arc<dyn ArchitectureQuery> = if any_host {
        Arc::new(SysinfoArchitectureQuery::any_host())
    } else {
        Arc::new(SysinfoArchitectureQuery::new())
    };
    let probe = ArchitectureProbe::new(query);
    let task = task::new_task(engine);

    let arch = probe.current_process_architecture();
    match arch {
        HostArchitecture::Unsupported => task
            .log()
            .log_warning_with_code_from_resources("Cli.ArchitectureUnsupported", &[])?,
        HostArchitecture::Unrecognized => task
            .log()
            .log_warning_with_code_from_resources("Cli.ArchitectureUnrecognized", &[])?,
        HostArchitecture::Known(known) => task
            .log()
            .log_message_from_resources("Cli.ArchitectureDetected", &[&known])?,
    }

    if json {
        let output = serde_json::json!({
            "supported": arch != HostArchitecture::Unsupported,
            "architecture": arch.name(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match arch {
        HostArchitecture::Unsupported => println!("{}", "(unsupported host)".yellow()),
        HostArchitecture::Unrecognized => println!("{}", "(unknown)".yellow()),
        HostArchitecture::Known(known) => println!("{}", known.as_str().green()),
    }

    Ok(())
}

fn run_param(
    engine: Arc<TracingBuildEngine>,
    file: Option<PathBuf>,
    assignments: &[String],
    key: &str,
    kind: ParameterKind,
    default: &str,
    json: bool,
) -> Result<()> {
    let mut task = task::new_task(engine);

    if let Some(path) = file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let count = task.load_parameters(&content)?;
        task.log().log_message_from_resources(
            "Cli.ParametersLoaded",
            &[&count, &path.display()],
        )?;
    }

    for assignment in assignments {
        let Some((name, raw)) = assignment.split_once('=') else {
            task.log()
                .log_error_with_code_from_resources("Cli.InvalidAssignment", &[assignment])?;
            bail!("Invalid assignment: {}", assignment);
        };
        // A rejected value is already reported by the runtime
        task.set_parameter_from_string(name.trim(), kind, raw)?;
    }

    let Some(default_value) = kind.parse(default) else {
        task.log()
            .log_error_with_code_from_resources("Cli.InvalidDefault", &[&default, &kind])?;
        return Err(anyhow!("Invalid default for {}: {}", kind, default));
    };

    let value: ParameterValue = match default_value {
        ParameterValue::Bool(d) => task.get_bool_parameter_with_default(key, d)?.into(),
        ParameterValue::Int(d) => task.get_int_parameter_with_default(key, d)?.into(),
        ParameterValue::String(d) => task.get_parameter_with_default::<String>(key, d)?.into(),
        ParameterValue::StringArray(d) => {
            task.get_parameter_with_default::<Vec<String>>(key, d)?.into()
        }
    };

    let rendered = render_value(&value);
    task.log()
        .log_message_from_resources("Cli.ParameterResolved", &[&key, &rendered])?;

    if json {
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Plain-text form of a parameter value (arrays are `;`-joined)
fn render_value(value: &ParameterValue) -> String {
    match value {
        ParameterValue::Bool(b) => b.to_string(),
        ParameterValue::Int(i) => i.to_string(),
        ParameterValue::String(s) => s.clone(),
        ParameterValue::StringArray(items) => items.join(";"),
    }
}
