use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::model::ColumnSpec;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{binary} exited with {status}: {stderr}")]
    Failed {
        binary: String,
        status: String,
        stderr: String,
    },
    #[error("zfs list output is not valid UTF-8")]
    InvalidUtf8,
    #[error("no zfs datasets found")]
    Empty,
}

/// What to ask `zfs list` for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    pub columns: ColumnSpec,
    pub root: Option<String>,
}

impl ListRequest {
    pub fn new(columns: ColumnSpec, root: Option<String>) -> Self {
        Self { columns, root }
    }

    /// Arguments after the binary: tab separated, no header, exact numbers,
    /// recursive over every dataset type.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "list".to_string(),
            "-H".to_string(),
            "-p".to_string(),
            "-r".to_string(),
            "-t".to_string(),
            "all".to_string(),
            "-o".to_string(),
            self.columns.fetch_arg(),
        ];
        if let Some(root) = &self.root {
            args.push(root.clone());
        }
        args
    }
}

/// Source of raw `zfs list` output.
pub trait ListSource {
    fn list(&self, request: &ListRequest) -> Result<String, FetchError>;
}

/// Runs the host `zfs` binary.
#[derive(Clone, Debug)]
pub struct ZfsCommand {
    binary: PathBuf,
}

impl ZfsCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for ZfsCommand {
    fn default() -> Self {
        Self::new("zfs")
    }
}

impl ListSource for ZfsCommand {
    fn list(&self, request: &ListRequest) -> Result<String, FetchError> {
        let binary = self.binary.display().to_string();
        let args = request.args();
        tracing::debug!(%binary, ?args, "running zfs list");

        let out = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| FetchError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            return Err(FetchError::Failed {
                binary,
                status: out.status.to_string(),
                stderr,
            });
        }

        String::from_utf8(out.stdout).map_err(|_| FetchError::InvalidUtf8)
    }
}
