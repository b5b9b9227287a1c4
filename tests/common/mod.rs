#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};

/// A stand-in `zfs` binary: records its arguments and prints a canned listing.
pub struct FakeZfs {
    pub dir: tempfile::TempDir,
    pub binary: PathBuf,
}

impl FakeZfs {
    pub fn listing(output: &str) -> Result<Self> {
        Self::script(output, "cat \"$DIR/listing.txt\"\n")
    }

    pub fn failing(stderr: &str) -> Result<Self> {
        Self::script(stderr, "cat \"$DIR/listing.txt\" >&2\nexit 1\n")
    }

    fn script(payload: &str, body: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create fake zfs tempdir")?;
        fs::write(dir.path().join("listing.txt"), payload).context("write canned output")?;

        let binary = dir.path().join("zfs");
        let script = format!(
            "#!/bin/sh\nDIR='{}'\nprintf '%s\\n' \"$*\" > \"$DIR/args.txt\"\n{}",
            dir.path().display(),
            body
        );
        fs::write(&binary, script).context("write fake zfs")?;
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))
            .context("chmod fake zfs")?;

        Ok(Self { dir, binary })
    }

    pub fn recorded_args(&self) -> Result<String> {
        let path = self.dir.path().join("args.txt");
        let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(text.trim_end().to_string())
    }
}

pub fn run_viewer(zfs: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_zfs-list-tui"))
        .arg("--zfs")
        .arg(zfs)
        .args(args)
        .output()
        .with_context(|| format!("run zfs-list-tui {:?}", args))
}

pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}
