use crate::exporter::EnvExporter;
use crate::view::ExportView;
use crate::ExportError;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const REAP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The real exporter: shells out to `conda env export` and captures its
/// stdout, with a bounded wall-clock timeout on the blocking call.
pub struct CondaExporter {
    program: String,
    timeout: Duration,
}

impl Default for CondaExporter {
    fn default() -> Self {
        Self {
            program: "conda".to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CondaExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the conda executable, e.g. an absolute path or a shim.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command_line(&self, env_name: &str, view: ExportView) -> String {
        format!("{} env export -n {env_name} {}", self.program, view.flag())
    }
}

impl EnvExporter for CondaExporter {
    fn name(&self) -> &str {
        "conda"
    }

    fn available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn export(&self, env_name: &str, view: ExportView) -> Result<String, ExportError> {
        let command_text = self.command_line(env_name, view);
        debug!("running export: {command_text}");

        let mut command = Command::new(&self.program);
        command.args(["env", "export", "-n", env_name, view.flag()]);
        run_captured(command, &command_text, self.timeout)
    }
}

/// Run a command to completion, capturing stdout, with a bounded
/// wall-clock timeout. On timeout the child is killed and reaped.
///
/// The calling thread keeps ownership of the child so it can kill it at
/// any time; helper threads own only the pipes. Killing the child closes
/// the pipes, which unblocks the helper reads.
pub(crate) fn run_captured(
    mut command: Command,
    command_text: &str,
    timeout: Duration,
) -> Result<String, ExportError> {
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout_reader = spawn_pipe_reader(child.stdout.take());
    let stderr_reader = spawn_pipe_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExportError::Timeout {
                command: command_text.to_owned(),
                seconds: timeout.as_secs(),
            });
        }
        thread::sleep(REAP_POLL_INTERVAL);
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        let stderr_text = String::from_utf8_lossy(&stderr).into_owned();
        debug!("--- stdout ---");
        for line in String::from_utf8_lossy(&stdout).lines() {
            debug!("{line}");
        }
        debug!("--- stderr ---");
        for line in stderr_text.lines() {
            debug!("{line}");
        }
        debug!("--- end ---");
        return Err(ExportError::ExportFailed {
            command: command_text.to_owned(),
            detail: first_nonempty_line(&stderr_text)
                .unwrap_or_else(|| format!("exit status {status}")),
        });
    }

    String::from_utf8(stdout).map_err(|_| ExportError::InvalidOutput {
        command: command_text.to_owned(),
    })
}

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn first_nonempty_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_includes_view_flag() {
        let exporter = CondaExporter::new();
        assert_eq!(
            exporter.command_line("ds310", ExportView::FromHistory),
            "conda env export -n ds310 --from-history"
        );
        assert_eq!(
            exporter.command_line("ds310", ExportView::NoBuildStrings),
            "conda env export -n ds310 --no-builds"
        );
    }

    #[test]
    fn missing_program_reports_failure() {
        let exporter = CondaExporter::new().with_program("leanenv-no-such-conda");
        assert!(!exporter.available());
        assert!(exporter.export("any", ExportView::FromHistory).is_err());
    }

    #[test]
    fn captures_stdout_of_successful_command() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf 'name: ds310\n'"]);
        let out = run_captured(cmd, "sh -c printf", Duration::from_secs(5)).unwrap();
        assert_eq!(out, "name: ds310\n");
    }

    #[test]
    fn nonzero_exit_carries_stderr_detail() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'EnvironmentLocationNotFound' >&2; exit 1"]);
        let err = run_captured(cmd, "sh -c fail", Duration::from_secs(5)).unwrap_err();
        match err {
            ExportError::ExportFailed { command, detail } => {
                assert_eq!(command, "sh -c fail");
                assert_eq!(detail, "EnvironmentLocationNotFound");
            }
            other => panic!("expected ExportFailed, got {other:?}"),
        }
    }

    #[test]
    fn timeout_kills_slow_process() {
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let start = Instant::now();
        let err = run_captured(cmd, "sleep 30", Duration::from_millis(200)).unwrap_err();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(matches!(err, ExportError::Timeout { .. }));
    }

    #[test]
    fn first_nonempty_line_skips_blanks() {
        assert_eq!(
            first_nonempty_line("\n\n  error: no env\nmore").as_deref(),
            Some("error: no env")
        );
        assert!(first_nonempty_line("\n \n").is_none());
    }
}
