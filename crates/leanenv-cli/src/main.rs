mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_EXPORT_ERROR, EXIT_FAILURE, EXIT_VALIDATION_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "leanenv",
    version,
    about = "Lean-clone a conda environment onto a new kernel version"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derive a lean, version-bumped descriptor from an existing environment.
    Clone {
        /// Kernel version of the environment to clone, e.g. 3.10 (not 310).
        #[arg(long)]
        old_ver: String,
        /// Kernel version of the new environment, e.g. 3.9 (not 39).
        #[arg(long)]
        new_ver: String,
        /// Name of the existing environment to clone.
        #[arg(long)]
        env_to_clone: String,
        /// Name for the new environment; the default derives one from
        /// the kernel and version, e.g. py39.
        #[arg(long, default_value = "default")]
        new_env_name: String,
        /// Interpreter kernel ('python' is the only implemented family).
        #[arg(long, default_value = "python")]
        kernel: String,
        /// Strip periods from an explicitly requested environment name.
        #[arg(long, default_value_t = false)]
        dotless_name: bool,
        /// Directory for the output file (default: home directory).
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Keep the raw export streams next to the output file.
        #[arg(long, default_value_t = false)]
        keep_intermediate: bool,
        /// Do not print the new descriptor after writing it.
        #[arg(long, default_value_t = false)]
        no_display: bool,
        /// Exporter backend to use.
        #[arg(long, default_value = "conda", value_parser = ["conda", "mock"])]
        exporter: String,
    },
    /// Run diagnostic checks on the conda installation and exporter.
    Doctor,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LEANENV_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;
    let result = match cli.command {
        Commands::Clone {
            old_ver,
            new_ver,
            env_to_clone,
            new_env_name,
            kernel,
            dotless_name,
            output_dir,
            keep_intermediate,
            no_display,
            exporter,
        } => commands::clone::run(
            &commands::clone::CloneArgs {
                old_ver,
                new_ver,
                env_to_clone,
                new_env_name,
                kernel,
                dotless_name,
                output_dir,
                keep_intermediate,
                no_display,
                exporter,
            },
            json_output,
        ),
        Commands::Doctor => commands::doctor::run(json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("schema error:") || msg.starts_with("unsupported kernel")
            {
                EXIT_VALIDATION_ERROR
            } else if msg.starts_with("export error:") {
                EXIT_EXPORT_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
