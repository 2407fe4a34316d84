/// Process runner for the OCR tool.
///
/// Starts the executable directly (no shell), feeds it a payload on stdin and
/// collects stdout/stderr, bounded by a timeout.
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use ocrname_core::OcrNameError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Exec result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ExecResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// -1 when the process was killed by a signal.
    pub exit_code: i32,
}

// ---------------------------------------------------------------------------
// Spawn + run
// ---------------------------------------------------------------------------

/// Run `program`, write `input` to its stdin and wait for it to exit.
///
/// On timeout the child is killed and reaped before the error is returned.
pub async fn exec_with_stdin(
    program: impl AsRef<OsStr>,
    input: &[u8],
    timeout: Duration,
) -> Result<ExecResult, OcrNameError> {
    let program = program.as_ref();
    debug!(tool = ?program, bytes = input.len(), "Starting OCR tool");

    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| OcrNameError::OcrSpawn {
            tool: program.to_string_lossy().into_owned(),
            source,
        })?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let run = async {
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let (written, out, err) = tokio::join!(write, read_all(stdout), read_all(stderr));

        // A tool that exits without reading its input closes the pipe early.
        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e);
            }
            debug!("OCR tool closed stdin before reading the request");
        }

        let status = child.wait().await?;
        Ok(ExecResult {
            stdout: out?,
            stderr: err?,
            exit_code: status.code().unwrap_or(-1),
        })
    };

    let outcome = tokio::time::timeout(timeout, run).await;
    match outcome {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(OcrNameError::OcrIo(e)),
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "OCR tool timed out; killing it");
            let _ = child.start_kill();
            let _ = child.wait().await;
            Err(OcrNameError::OcrTimeout(timeout.as_secs()))
        }
    }
}

async fn read_all<R: AsyncRead + Unpin>(handle: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        h.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
