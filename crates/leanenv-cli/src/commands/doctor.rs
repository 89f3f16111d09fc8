use super::{EXIT_FAILURE, EXIT_SUCCESS};
use leanenv_export::{CondaExporter, CondaInstall, EnvExporter};

pub fn run(json_output: bool) -> Result<u8, String> {
    let mut checks: Vec<Check> = Vec::new();
    let mut all_pass = true;

    match CondaInstall::discover() {
        Ok(install) => {
            checks.push(Check::pass(
                "conda_install",
                &format!("Conda installation found at {}", install.root().display()),
            ));
            if install.envs_dir().is_dir() {
                checks.push(Check::pass("envs_dir", "Environments directory exists"));
            } else {
                all_pass = false;
                checks.push(Check::fail(
                    "envs_dir",
                    &format!("Missing environments directory: {}", install.envs_dir().display()),
                ));
            }
            if install.user_condarc().is_some() {
                checks.push(Check::info("condarc", "User .condarc found"));
            } else {
                checks.push(Check::info(
                    "condarc",
                    "No user .condarc (add_pip_as_python_dependency defaults to true)",
                ));
            }
        }
        Err(e) => {
            all_pass = false;
            checks.push(Check::fail("conda_install", &e.to_string()));
        }
    }

    let exporter = CondaExporter::new();
    if exporter.available() {
        checks.push(Check::pass("exporter", "conda executable answers --version"));
    } else {
        all_pass = false;
        checks.push(Check::fail(
            "exporter",
            "conda executable not found on PATH",
        ));
    }

    print_results(&checks, all_pass, json_output)
}

fn print_results(checks: &[Check], all_pass: bool, json_output: bool) -> Result<u8, String> {
    if json_output {
        let json = serde_json::json!({
            "healthy": all_pass,
            "checks": checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "status": c.status,
                "message": c.message,
            })).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?
        );
    } else {
        println!("Leanenv Doctor\n");
        for check in checks {
            let icon = match check.status.as_str() {
                "pass" => "✓",
                "fail" => "✗",
                _ => "ℹ",
            };
            println!("  {icon} {}", check.message);
        }
        println!();
        if all_pass {
            println!("All checks passed.");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }
    Ok(if all_pass { EXIT_SUCCESS } else { EXIT_FAILURE })
}

struct Check {
    name: String,
    status: String,
    message: String,
}

impl Check {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "pass".to_owned(),
            message: message.to_owned(),
        }
    }

    fn fail(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "fail".to_owned(),
            message: message.to_owned(),
        }
    }

    fn info(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "info".to_owned(),
            message: message.to_owned(),
        }
    }
}
