use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Failure of an external pipeline tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("`{tool}` not found in PATH")]
    NotFound { tool: String },
    #[error("`{tool}` exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn spawn_error(tool: &str, err: io::Error) -> ToolError {
    if err.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound {
            tool: tool.to_string(),
        }
    } else {
        ToolError::Io(err)
    }
}

/// Run a tool to completion, capturing its output
pub(crate) fn run_tool(cmd: &mut Command, tool: &str) -> Result<(), ToolError> {
    let output = cmd.output().map_err(|e| spawn_error(tool, e))?;

    if output.status.success() {
        return Ok(());
    }

    Err(ToolError::Failed {
        tool: tool.to_string(),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    })
}

/// Run a tool with inherited stdio, for long-running steps whose progress
/// should stream to the console
pub(crate) fn run_tool_streaming(cmd: &mut Command, tool: &str) -> Result<(), ToolError> {
    let status = cmd.status().map_err(|e| spawn_error(tool, e))?;

    if status.success() {
        return Ok(());
    }

    Err(ToolError::Failed {
        tool: tool.to_string(),
        status,
        stderr: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reports_not_found() {
        let mut cmd = Command::new("definitely-not-a-real-tool-1b2c3");
        let err = run_tool(&mut cmd, "definitely-not-a-real-tool-1b2c3").unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }
}
