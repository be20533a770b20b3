//! Shared runner for external paste tools

use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::KeystrokeError;

/// Run a paste tool, mapping a missing binary to `ToolNotFound`
pub(super) async fn run_tool(program: &'static str, args: &[String]) -> Result<(), KeystrokeError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KeystrokeError::ToolNotFound(program)
            } else {
                KeystrokeError::SendFailed(e.to_string())
            }
        })?;

    if !status.success() {
        return Err(KeystrokeError::SendFailed(format!(
            "{} exited with status: {}",
            program, status
        )));
    }

    Ok(())
}
