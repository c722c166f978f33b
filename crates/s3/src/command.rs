//! External process runner
//!
//! Every external tool call goes through here so they are logged and their
//! failures reported the same way.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use sync_core::{Error, Result};
use tokio::process::Command;

/// Render a command line for logs and error messages
pub(crate) fn display(program: &Path, args: &[OsString]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run a command with inherited stdio and wait for it to finish
pub(crate) async fn run(program: &Path, args: &[OsString]) -> Result<()> {
    tracing::debug!("Running command: {:?}", self::display(program, args));

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .status()
        .await
        .map_err(|source| Error::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(Error::CommandFailed {
            command: display(program, args),
            code: status.code(),
        });
    }
    Ok(())
}

/// Run a command and return its standard output
///
/// Standard error is left attached to ours.
pub(crate) async fn output(program: &Path, args: &[OsString]) -> Result<Vec<u8>> {
    tracing::debug!("Running command: {:?}", self::display(program, args));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .await
        .map_err(|source| Error::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: display(program, args),
            code: output.status.code(),
        });
    }
    Ok(output.stdout)
}

/// Write an executable shell script standing in for an external tool
#[cfg(all(test, unix))]
pub(crate) fn stub_program(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Read the arguments recorded by a stub that writes `"$@"` to `$0.args`
#[cfg(all(test, unix))]
pub(crate) fn recorded_args(program: &Path) -> Vec<String> {
    let mut args_file = program.as_os_str().to_owned();
    args_file.push(".args");
    std::fs::read_to_string(args_file)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
