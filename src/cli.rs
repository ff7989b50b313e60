//! CLI argument parsing for the batch onboarding workflow.
//!
//! Commands only parse flags; every decision about records, config and the
//! remote API lives in `workflow`.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "staff-onboard",
    version,
    about = "Generate synthetic senior-care staff records and onboard them through the platform API",
    after_help = "Commands:\n  init --batch <dir>       Write batch/config.json with organization defaults\n  generate --batch <dir>   Generate employee records into batch/records.json\n  deploy --batch <dir>     Create the organization and onboard every record\n  status --batch <dir>     Summarize records and the last deployment\n  clear --batch <dir>      Remove generated records and the last report\n\nExamples:\n  staff-onboard init --batch /tmp/sunrise --org-name \"Sunrise Senior Living\"\n  staff-onboard generate --batch /tmp/sunrise --count 10 --seed 7\n  staff-onboard deploy --batch /tmp/sunrise --api-base-url http://localhost:8000\n  staff-onboard status --batch /tmp/sunrise --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug-level logs on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Generate(GenerateArgs),
    Deploy(DeployArgs),
    Status(StatusArgs),
    Clear(ClearArgs),
}

/// Batch directory shared by every command.
#[derive(Args, Debug, Clone)]
pub struct BatchArg {
    /// Batch directory holding config, records, report and history
    /// (defaults to a per-user data directory)
    #[arg(long, value_name = "DIR")]
    pub batch: Option<PathBuf>,
}

/// Init command inputs.
#[derive(Parser, Debug)]
#[command(about = "Initialize a batch directory with organization defaults")]
pub struct InitArgs {
    #[command(flatten)]
    pub batch: BatchArg,

    /// Organization name used for generated emails and API calls
    #[arg(long, value_name = "NAME")]
    pub org_name: Option<String>,

    /// Organization type (repeatable), e.g. "SLF" or "ALF/SHE memory care"
    #[arg(long = "org-type", value_name = "TYPE")]
    pub org_types: Vec<String>,

    /// API base URL stored in the config
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Overwrite an existing config.json
    #[arg(long)]
    pub force: bool,
}

/// Generate command inputs. Unset flags fall back to the batch config.
#[derive(Parser, Debug)]
#[command(about = "Generate employee records for the configured organization")]
pub struct GenerateArgs {
    #[command(flatten)]
    pub batch: BatchArg,

    /// Number of employees to generate (1..=100)
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,

    /// Organization name override
    #[arg(long, value_name = "NAME")]
    pub org_name: Option<String>,

    /// Organization type override (repeatable)
    #[arg(long = "org-type", value_name = "TYPE")]
    pub org_types: Vec<String>,

    /// Share of staff records (0.0..=1.0)
    #[arg(long, value_name = "FRACTION")]
    pub staff: Option<f64>,

    /// Share of instructor records (0.0..=1.0)
    #[arg(long, value_name = "FRACTION")]
    pub instructor: Option<f64>,

    /// Share of facility admin records (0.0..=1.0)
    #[arg(long, value_name = "FRACTION")]
    pub facility_admin: Option<f64>,

    /// Seed for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Emit the generated records as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Deploy command inputs.
#[derive(Parser, Debug)]
#[command(about = "Deploy the generated records through the platform API")]
pub struct DeployArgs {
    #[command(flatten)]
    pub batch: BatchArg,

    /// API base URL (overrides config and STAFF_ONBOARD_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Write every issued temporary password into one JSON document
    #[arg(long, value_name = "PATH")]
    pub credentials_out: Option<PathBuf>,

    /// Write one credentials JSON document per newly created user
    #[arg(long, value_name = "DIR")]
    pub credentials_dir: Option<PathBuf>,

    /// Do not print issued temporary passwords on stdout
    #[arg(long)]
    pub hide_passwords: bool,

    /// Emit the deployment report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Status command inputs.
#[derive(Parser, Debug)]
#[command(about = "Summarize batch records and the last deployment")]
pub struct StatusArgs {
    #[command(flatten)]
    pub batch: BatchArg,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Clear command inputs.
#[derive(Parser, Debug)]
#[command(about = "Remove generated records and the last deployment report")]
pub struct ClearArgs {
    #[command(flatten)]
    pub batch: BatchArg,
}
