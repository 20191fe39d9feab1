use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, warn};

fn run_command(bin: &str, model: &str, prompt: &str) -> Command {
    let mut cmd = Command::new(bin);
    cmd.arg("run").arg(model).arg(prompt);
    cmd
}

fn list_command(bin: &str) -> Command {
    let mut cmd = Command::new(bin);
    cmd.arg("list");
    cmd
}

/// Runs `<bin> run <model> <prompt>` with inherited stdio so the runtime
/// streams its own token display. A non-zero child exit is not reclassified:
/// the child already wrote its diagnostics to the shared terminal.
pub async fn run(bin: &str, model: &str, prompt: &str) -> Result<()> {
    debug!(bin = %bin, model = %model, prompt_len = prompt.len(), "spawning local runtime");
    let status = run_command(bin, model, prompt)
        .status()
        .await
        .with_context(|| format!("Failed to run '{bin}'"))?;

    if !status.success() {
        warn!(bin = %bin, model = %model, status = %status, "local runtime exited with failure");
    }
    Ok(())
}

/// Captures `<bin> list` stdout verbatim.
pub async fn list_models(bin: &str) -> Result<String> {
    debug!(bin = %bin, "listing local models");
    let output = list_command(bin)
        .output()
        .await
        .with_context(|| format!("Failed to run '{bin} list'"))?;

    if !output.status.success() {
        warn!(bin = %bin, status = %output.status, "model listing exited with failure");
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
