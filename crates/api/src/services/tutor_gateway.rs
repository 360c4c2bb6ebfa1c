//! Prompt assembly and the streaming relay to the LLM runtime (spec §4.5).
//!
//! `SYSTEM = PERSONA ∥ CONTEXT ∥ MODE_INSTRUCTION`. The runtime call itself
//! follows the channel pattern from the design notes: a background task owns
//! the upstream HTTP stream and writes decoded tokens into a bounded
//! channel; the SSE handler only ever reads the channel, so a client
//! disconnect (receiver dropped) is observed by the task the next time it
//! tries to send and ends the upstream call there.

use std::time::Duration;

use axum::response::sse::Event;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use jlpt_tutor_domain::{JlptLevel, Mode};

const PERSONA: &str = "You are a patient, encouraging Japanese language tutor for a learner \
studying for the JLPT. Never simply translate on request — teach, explain, and quiz instead. \
Always annotate kanji with furigana using <ruby>kanji<rt>kana</rt></ruby> markup.";

const NO_TOKEN_TIMEOUT: Duration = Duration::from_secs(120);
const CHANNEL_CAPACITY: usize = 32;

/// Builds the full system prompt for one turn.
pub fn assemble_system_prompt(
    jlpt_focus: JlptLevel,
    recent_reviewed: &[String],
    weakest: &[String],
    mode: Mode,
    user_message: &str,
) -> String {
    let recent = if recent_reviewed.is_empty() {
        "none yet".to_string()
    } else {
        recent_reviewed.join(", ")
    };
    let weak = if weakest.is_empty() {
        "none yet".to_string()
    } else {
        weakest.join(", ")
    };

    let context = format!(
        "The learner's current JLPT focus level is {jlpt_focus}. \
         Recently reviewed items: {recent}. \
         Items needing the most reinforcement: {weak}."
    );

    let instruction = mode_instruction(mode, jlpt_focus, user_message);

    format!("{PERSONA}\n\n{context}\n\n{instruction}")
}

fn mode_instruction(mode: Mode, level: JlptLevel, user_message: &str) -> String {
    match mode {
        Mode::Teach => format!(
            "Introduce one grammar point or word class appropriate for {level}; give a dialogue example."
        ),
        Mode::Quiz => "Generate one fill-in-the-blank using an item from recently studied \
            vocabulary; offer 4 choices and mark the answer."
            .to_string(),
        Mode::Explain => format!(
            "Explain `{user_message}` deeply: etymology, on/kun readings where applicable, 3 usage examples."
        ),
        Mode::Correct => format!(
            "The learner wrote: `{user_message}`. Identify particle/conjugation/register errors; \
             explain each; give a corrected sentence; do not merely re-translate."
        ),
        Mode::Chat => "Freely converse in Japanese at the learner's level; keep turns short.".to_string(),
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

fn error_event(code: &str) -> Event {
    Event::default().data(serde_json::json!({ "error": code }).to_string())
}

fn done_event() -> Event {
    Event::default().data("[DONE]")
}

/// Opens the streaming generate call and relays tokens as SSE frames onto a
/// bounded channel, returned as a [`ReceiverStream`].
///
/// Errors never propagate as a `Result` — every failure mode from spec §4.5
/// is instead surfaced as a terminal `data: {"error": "..."}\n\n` frame
/// followed by `data: [DONE]\n\n`, exactly like a successful stream's end.
pub fn stream_chat(
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    system: String,
    user_message: String,
) -> ReceiverStream<Event> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let body = GenerateRequest {
            model: &model,
            system: &system,
            prompt: &user_message,
            stream: true,
        };

        let response = match http_client
            .post(format!("{base_url}/api/generate"))
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("tutor gateway: LLM runtime unreachable: {}", e);
                let _ = tx.send(error_event("tutor-unavailable")).await;
                let _ = tx.send(done_event()).await;
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if text.to_lowercase().contains("not found") {
                tracing::warn!("tutor gateway: model '{}' missing on runtime", model);
                let _ = tx.send(error_event(&format!("model-missing:{model}"))).await;
            } else {
                tracing::warn!("tutor gateway: runtime responded {}: {}", status, text);
                let _ = tx.send(error_event("tutor-unavailable")).await;
            }
            let _ = tx.send(done_event()).await;
            return;
        }

        let mut byte_stream = response.bytes_stream();
        let mut buffer = String::new();

        loop {
            use futures::StreamExt;

            let next = tokio::time::timeout(NO_TOKEN_TIMEOUT, byte_stream.next()).await;

            let chunk = match next {
                Ok(Some(Ok(bytes))) => bytes,
                Ok(Some(Err(e))) => {
                    tracing::warn!("tutor gateway: upstream read error: {}", e);
                    let _ = tx.send(error_event("tutor-unavailable")).await;
                    let _ = tx.send(done_event()).await;
                    return;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!("tutor gateway: no token within timeout");
                    let _ = tx.send(error_event("response-timed-out")).await;
                    let _ = tx.send(done_event()).await;
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline_pos) = buffer.find('\n') {
                let line = buffer[..newline_pos].trim().to_string();
                buffer.drain(..=newline_pos);

                if line.is_empty() {
                    continue;
                }

                let parsed: GenerateChunk = match serde_json::from_str(&line) {
                    Ok(chunk) => chunk,
                    Err(_) => continue,
                };

                if !parsed.response.is_empty() && tx.send(Event::default().data(parsed.response)).await.is_err() {
                    return;
                }

                if parsed.done {
                    let _ = tx.send(done_event()).await;
                    return;
                }
            }
        }

        let _ = tx.send(done_event()).await;
    });

    ReceiverStream::new(rx)
}
