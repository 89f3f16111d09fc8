use super::{json_pretty, spin_fail, spin_ok, spinner, EXIT_SUCCESS};
use leanenv_core::{CloneEngine, CloneRequest};
use leanenv_export::{select_exporter, CondaInstall};
use leanenv_schema::Kernel;
use std::path::PathBuf;

pub struct CloneArgs {
    pub old_ver: String,
    pub new_ver: String,
    pub env_to_clone: String,
    pub new_env_name: String,
    pub kernel: String,
    pub dotless_name: bool,
    pub output_dir: Option<PathBuf>,
    pub keep_intermediate: bool,
    pub no_display: bool,
    pub exporter: String,
}

pub fn run(args: &CloneArgs, json: bool) -> Result<u8, String> {
    let kernel: Kernel = args.kernel.parse().map_err(|e: leanenv_schema::SchemaError| e.to_string())?;
    let install = CondaInstall::discover().map_err(|e| e.to_string())?;
    let exporter = select_exporter(&args.exporter).map_err(|e| e.to_string())?;
    let engine = CloneEngine::new(install, exporter);

    let request = CloneRequest {
        old_ver: args.old_ver.clone(),
        new_ver: args.new_ver.clone(),
        env_to_clone: args.env_to_clone.clone(),
        new_env_name: args.new_env_name.clone(),
        kernel,
        dotless_name: args.dotless_name,
        output_dir: args.output_dir.clone(),
        keep_intermediate: args.keep_intermediate,
    };

    let pb = if json {
        None
    } else {
        Some(spinner("exporting environment views..."))
    };

    let outcome = match engine.clone_env(&request) {
        Ok(outcome) => {
            if let Some(ref pb) = pb {
                spin_ok(pb, "lean descriptor created");
            }
            outcome
        }
        Err(e) => {
            if let Some(ref pb) = pb {
                spin_fail(pb, "clone failed");
            }
            return Err(e.to_string());
        }
    };

    if json {
        let payload = serde_json::json!({
            "env_name": outcome.env_name,
            "output_path": outcome.output_path,
            "intermediate": outcome.intermediate,
            "status": "cloned"
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    println!(
        "new environment file: {}",
        console::style(outcome.output_path.display()).green()
    );
    if !outcome.intermediate.is_empty() {
        println!("kept intermediate export snapshots:");
        for path in &outcome.intermediate {
            println!("  - {}", path.display());
        }
    }
    if !args.no_display {
        let text = outcome
            .descriptor
            .to_yaml_string()
            .map_err(|e| e.to_string())?;
        println!("\n{text}");
    }
    println!(
        "create the new environment with:\n  conda env create -f {}",
        outcome.output_path.display()
    );
    Ok(EXIT_SUCCESS)
}
