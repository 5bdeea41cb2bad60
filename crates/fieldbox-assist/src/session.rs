//! Assistant conversation session: a linear transcript with one exchange in
//! flight at a time.

use tokio::sync::Mutex;
use tracing::{debug, warn};

use fieldbox_core::{defaults, ChatBackend, ChatTurn};

/// Whether a boundary call is currently outstanding for this conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// Outcome of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange completed and an assistant turn was appended.
    Sent,
    /// Empty/whitespace input or a request already in flight; nothing
    /// changed.
    Ignored,
    /// The boundary call failed; the optimistic user turn remains, no
    /// assistant turn was appended.
    Failed,
}

/// A linear, append-only assistant conversation.
pub struct AssistantSession {
    turns: Vec<ChatTurn>,
    state: SessionState,
}

impl AssistantSession {
    /// Create a session seeded with the greeting turn.
    pub fn new() -> Self {
        Self {
            turns: vec![ChatTurn::assistant(defaults::ASSISTANT_GREETING)],
            state: SessionState::Idle,
        }
    }

    /// The transcript in order.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Discard the transcript and reseed the greeting turn, as when the
    /// assistant panel is reopened.
    pub fn reset(&mut self) {
        self.turns = vec![ChatTurn::assistant(defaults::ASSISTANT_GREETING)];
        self.state = SessionState::Idle;
    }
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Send `text` on the session, driving one full IDLE → AWAITING_RESPONSE →
/// IDLE cycle.
///
/// The send is a no-op when `text` is empty/whitespace-only or a request is
/// already in flight (back-pressure by rejection, not queueing). Otherwise
/// the user turn is appended immediately and exactly one boundary call is
/// issued. On success an assistant turn is appended (an empty model reply
/// is substituted with a fixed fallback string); on failure nothing is
/// appended and the error is logged for operator diagnosis, leaving the
/// caller free to retry.
///
/// The session lock is released while the boundary call is outstanding so
/// other operations (and the in-flight rejection above) stay responsive.
pub async fn send(
    session: &Mutex<AssistantSession>,
    backend: &dyn ChatBackend,
    system: &str,
    text: &str,
) -> SendOutcome {
    {
        let mut guard = session.lock().await;
        if text.trim().is_empty() {
            debug!(
                subsystem = "assist",
                component = "session",
                op = "send",
                "Ignoring empty message"
            );
            return SendOutcome::Ignored;
        }
        if guard.state == SessionState::AwaitingResponse {
            debug!(
                subsystem = "assist",
                component = "session",
                op = "send",
                "Ignoring send while a request is in flight"
            );
            return SendOutcome::Ignored;
        }

        guard.turns.push(ChatTurn::user(text));
        guard.state = SessionState::AwaitingResponse;
    }

    let result = backend.generate_with_system(system, text).await;

    let mut guard = session.lock().await;
    guard.state = SessionState::Idle;
    match result {
        Ok(reply) => {
            let reply = if reply.trim().is_empty() {
                defaults::CHAT_EMPTY_REPLY.to_string()
            } else {
                reply
            };
            debug!(
                subsystem = "assist",
                component = "session",
                op = "send",
                model = backend.model_name(),
                response_len = reply.len(),
                "Assistant turn appended"
            );
            guard.turns.push(ChatTurn::assistant(reply));
            SendOutcome::Sent
        }
        Err(e) => {
            warn!(
                subsystem = "assist",
                component = "session",
                op = "send",
                model = backend.model_name(),
                error = %e,
                "Boundary call failed; no assistant turn appended"
            );
            SendOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockModelBackend;
    use fieldbox_core::ChatSpeaker;

    #[tokio::test]
    async fn new_session_is_seeded_with_the_greeting() {
        let session = AssistantSession::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].speaker, ChatSpeaker::Assistant);
        assert_eq!(session.transcript()[0].text, defaults::ASSISTANT_GREETING);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn send_appends_user_then_assistant_turn() {
        let session = Mutex::new(AssistantSession::new());
        let backend = MockModelBackend::new().with_default_reply("DL380の手順書があります。");

        let outcome = send(&session, &backend, "framing", "HDD交換は？").await;

        assert_eq!(outcome, SendOutcome::Sent);
        let guard = session.lock().await;
        let turns = guard.transcript();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker, ChatSpeaker::User);
        assert_eq!(turns[1].text, "HDD交換は？");
        assert_eq!(turns[2].speaker, ChatSpeaker::Assistant);
        assert_eq!(turns[2].text, "DL380の手順書があります。");
        assert_eq!(guard.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn empty_and_whitespace_messages_are_ignored() {
        let session = Mutex::new(AssistantSession::new());
        let backend = MockModelBackend::new();

        assert_eq!(send(&session, &backend, "f", "").await, SendOutcome::Ignored);
        assert_eq!(
            send(&session, &backend, "f", "   \n\t ").await,
            SendOutcome::Ignored
        );

        assert_eq!(session.lock().await.transcript().len(), 1);
        assert_eq!(backend.chat_call_count(), 0);
    }

    #[tokio::test]
    async fn send_while_awaiting_is_rejected_not_queued() {
        let session = Mutex::new(AssistantSession::new());
        let slow = MockModelBackend::new()
            .with_default_reply("遅い応答")
            .with_latency_ms(100);
        let fast = MockModelBackend::new();

        let (first, second) = tokio::join!(send(&session, &slow, "f", "先発"), async {
            // Give the first send time to enter AWAITING_RESPONSE.
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            send(&session, &fast, "f", "後発").await
        });

        assert_eq!(first, SendOutcome::Sent);
        assert_eq!(second, SendOutcome::Ignored);

        let guard = session.lock().await;
        // Greeting + one user turn + one assistant turn; the rejected send
        // left no trace.
        assert_eq!(guard.transcript().len(), 3);
        assert_eq!(fast.chat_call_count(), 0);
    }

    #[tokio::test]
    async fn failure_keeps_user_turn_and_appends_nothing() {
        let session = Mutex::new(AssistantSession::new());
        let backend = MockModelBackend::new().with_failure(true);

        let before = session.lock().await.transcript().len();
        let outcome = send(&session, &backend, "framing", "質問").await;

        assert_eq!(outcome, SendOutcome::Failed);
        let guard = session.lock().await;
        let turns = guard.transcript();
        assert_eq!(turns.len(), before + 1);
        assert_eq!(turns.last().unwrap().speaker, ChatSpeaker::User);
        assert_eq!(guard.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn empty_model_reply_is_substituted() {
        let session = Mutex::new(AssistantSession::new());
        let backend = MockModelBackend::new().with_default_reply("");

        let outcome = send(&session, &backend, "framing", "質問").await;

        assert_eq!(outcome, SendOutcome::Sent);
        let guard = session.lock().await;
        assert_eq!(
            guard.transcript().last().unwrap().text,
            defaults::CHAT_EMPTY_REPLY
        );
    }

    #[tokio::test]
    async fn reset_reseeds_the_greeting() {
        let session = Mutex::new(AssistantSession::new());
        let backend = MockModelBackend::new().with_default_reply("応答");
        send(&session, &backend, "f", "こんにちは").await;

        let mut guard = session.lock().await;
        assert!(guard.transcript().len() > 1);
        guard.reset();
        assert_eq!(guard.transcript().len(), 1);
        assert_eq!(guard.transcript()[0].text, defaults::ASSISTANT_GREETING);
    }

    #[tokio::test]
    async fn retry_after_failure_succeeds() {
        let session = Mutex::new(AssistantSession::new());
        let failing = MockModelBackend::new().with_failure(true);
        let working = MockModelBackend::new().with_default_reply("成功");

        assert_eq!(
            send(&session, &failing, "f", "一回目").await,
            SendOutcome::Failed
        );
        assert_eq!(
            send(&session, &working, "f", "二回目").await,
            SendOutcome::Sent
        );

        let guard = session.lock().await;
        // greeting, user, user, assistant
        assert_eq!(guard.transcript().len(), 4);
    }
}
