use std::process::Command;
use tracing::debug;

/// Result of asking a live service to pick up regenerated configuration.
/// An absent tool is distinct from a failing one: both are survivable, but
/// they warrant different log messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ReloadOutcome {
    Succeeded,
    Failed { status: Option<i32>, stderr: String },
    Unavailable,
}

/// Capability for invoking external reload commands, injected into the
/// orchestrator so tests never touch real system binaries.
pub trait ServiceReloader {
    fn reload(&self, program: &str, args: &[&str]) -> ReloadOutcome;
}

/// The production reloader: runs the command and maps the result.
pub struct SystemReloader;

impl ServiceReloader for SystemReloader {
    fn reload(&self, program: &str, args: &[&str]) -> ReloadOutcome {
        debug!("Running {} {}", program, args.join(" "));
        let output = match Command::new(program).args(args).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ReloadOutcome::Unavailable;
            }
            Err(e) => {
                return ReloadOutcome::Failed {
                    status: None,
                    stderr: e.to_string(),
                };
            }
        };

        if output.status.success() {
            ReloadOutcome::Succeeded
        } else {
            ReloadOutcome::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
        }
    }
}
