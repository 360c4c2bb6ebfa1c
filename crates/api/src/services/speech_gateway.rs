//! Subprocess-based speech synthesis (spec §4.6). Each call spawns a fresh
//! Piper process, writes the input text to its stdin, and reads the
//! complete WAV stream from its stdout until EOF — no process pool, no
//! cache, stderr drained and logged but never returned to the caller.

use std::time::Duration;

use tokio::io::{AsyncWriteExt, AsyncReadExt};
use tokio::process::Command;

const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum SpeechGatewayError {
    #[error("failed to spawn synthesizer: {0}")]
    Spawn(std::io::Error),
    #[error("synthesizer timed out after {0:?}")]
    Timeout(Duration),
    #[error("synthesizer exited with an error: {0}")]
    ProcessFailed(String),
    #[error("failed to communicate with synthesizer: {0}")]
    Io(std::io::Error),
}

/// Synthesizes `text` to WAV bytes by spawning `binary_path` with
/// `model_path` and `model_config_path` as arguments.
pub async fn synthesize(
    binary_path: &str,
    model_path: &str,
    model_config_path: &str,
    text: &str,
) -> Result<Vec<u8>, SpeechGatewayError> {
    let run = run_once(binary_path, model_path, model_config_path, text);

    match tokio::time::timeout(SYNTHESIS_TIMEOUT, run).await {
        Ok(result) => result,
        Err(_) => Err(SpeechGatewayError::Timeout(SYNTHESIS_TIMEOUT)),
    }
}

async fn run_once(
    binary_path: &str,
    model_path: &str,
    model_config_path: &str,
    text: &str,
) -> Result<Vec<u8>, SpeechGatewayError> {
    let mut child = Command::new(binary_path)
        .arg("--model")
        .arg(model_path)
        .arg("--config")
        .arg(model_config_path)
        .arg("--output-raw")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(SpeechGatewayError::Spawn)?;

    let mut stdin = child.stdin.take().expect("piped stdin");
    let mut stdout = child.stdout.take().expect("piped stdout");
    let mut stderr = child.stderr.take().expect("piped stderr");

    let text = text.to_string();
    let write_task = tokio::spawn(async move {
        let result = stdin.write_all(text.as_bytes()).await;
        drop(stdin);
        result
    });

    let mut wav_bytes = Vec::new();
    let read_result = stdout.read_to_end(&mut wav_bytes).await;

    let mut stderr_text = String::new();
    let _ = stderr.read_to_string(&mut stderr_text).await;
    if !stderr_text.trim().is_empty() {
        tracing::debug!("piper stderr: {}", stderr_text.trim());
    }

    let write_result = write_task.await.map_err(|e| {
        SpeechGatewayError::Io(std::io::Error::other(e.to_string()))
    })?;
    write_result.map_err(SpeechGatewayError::Io)?;
    read_result.map_err(SpeechGatewayError::Io)?;

    let status = child.wait().await.map_err(SpeechGatewayError::Io)?;
    if !status.success() {
        return Err(SpeechGatewayError::ProcessFailed(format!(
            "exit status {status}"
        )));
    }

    Ok(wav_bytes)
}
