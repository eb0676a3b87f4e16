//! Package installation for scaffolded projects
//!
//! Runs `npm install` in the project directory with streamed output and a
//! hard timeout. A failed or skipped installation never rolls back the
//! already-written scaffold; the caller reports it and moves on.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for package installation (5 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// The documentation URL offered when Node.js is missing
pub const NODE_DOCS_URL: &str = "https://nodejs.org/en/download";

/// Open the Node.js download page in the default browser
pub fn open_node_docs() -> Result<()> {
    println!(
        "{}",
        "Opening the Node.js download page in your browser...".cyan()
    );
    open::that(NODE_DOCS_URL)?;
    Ok(())
}

/// Run `npm install` in the project directory, streaming its output
pub async fn install_dependencies(project_dir: &Path) -> Result<()> {
    let cmd = "npm install";
    println!();
    println!(
        "{} {} {}",
        "Running:".dimmed(),
        cmd.yellow(),
        format!("in {}", project_dir.display()).dimmed()
    );
    println!();

    let mut child = TokioCommand::new("npm")
        .arg("install")
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to capture installer stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to capture installer stderr"))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    // Stream output with timeout
    let output_task = async {
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => {}
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                        }
                    }
                }
            }
        }
    };

    if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
        let _ = child.kill().await;
        println!();
        anyhow::bail!(
            "npm install timed out after {} seconds.\n\
             The registry may be unreachable. You can run it manually later:\n\
             cd {} && npm install",
            INSTALL_TIMEOUT.as_secs(),
            project_dir.display()
        );
    }

    // Wait for process to complete with timeout
    match timeout(Duration::from_secs(5), child.wait()).await {
        Ok(Ok(status)) => {
            println!();
            if status.success() {
                Ok(())
            } else {
                anyhow::bail!(
                    "npm install failed with exit code: {}\n\
                     You can run it manually later: cd {} && npm install",
                    status.code().unwrap_or(-1),
                    project_dir.display()
                );
            }
        }
        Ok(Err(e)) => {
            anyhow::bail!("Failed to wait for npm install: {}", e);
        }
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!(
                "npm install hung after its output ended. You can run it manually later:\n\
                 cd {} && npm install",
                project_dir.display()
            );
        }
    }
}
