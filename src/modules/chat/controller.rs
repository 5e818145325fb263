use reqwest::Method;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::modules::chat::{
    model::{
        clear_greeting, welcome_greeting, LoginRedirect, Message, Transcript, CATEGORIES,
        DEFAULT_CATEGORY,
    },
    schema::{ChatRequest, ChatResponse},
};
use crate::services::api::{decode, encode, TransportError};
use crate::services::liveness::{LivenessWatcher, SessionEvent};
use crate::services::sanitizer::SanitizedReply;
use crate::AppState;

pub const SESSION_ENDED_NOTICE: &str =
    "Your session has expired. Please log in again to continue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Composing,
    Sending,
}

#[derive(Debug)]
pub enum TurnOutcome {
    /// The sanitized bot reply was appended.
    Replied,
    /// An error notice was appended in place of a reply.
    Failed {
        error: TransportError,
        redirect: Option<LoginRedirect>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Ready,
    RedirectToLogin,
}

/// State behind the chat screen: the transcript, the selected category and
/// the phase of the current turn. `send` takes `&mut self`, so a second send
/// cannot start while one is in flight.
pub struct ChatController {
    state: AppState,
    transcript: Transcript,
    category: String,
    phase: TurnPhase,
}

impl ChatController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            transcript: Transcript::new(),
            category: DEFAULT_CATEGORY.to_string(),
            phase: TurnPhase::Composing,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn select_category(&mut self, category: &str) -> Result<(), TransportError> {
        if !CATEGORIES.contains(&category) {
            return Err(TransportError::Validation(format!(
                "Unknown category: {category}"
            )));
        }
        self.category = category.to_string();
        Ok(())
    }

    /// Screen entry: requires a stored token the backend still accepts, then
    /// greets the user.
    pub async fn mount(&mut self) -> Result<MountOutcome, TransportError> {
        let session = self.state.sessions().load()?;
        let Some(token) = session.token.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(MountOutcome::RedirectToLogin);
        };

        if !self.state.guard.is_session_valid(token).await {
            self.state.sessions().invalidate()?;
            return Ok(MountOutcome::RedirectToLogin);
        }

        self.transcript.reset(welcome_greeting(&session.display_name()));
        Ok(MountOutcome::Ready)
    }

    pub fn clear_chat(&mut self) -> Result<(), TransportError> {
        let session = self.state.sessions().load()?;
        self.transcript.reset(clear_greeting(&session.display_name()));
        Ok(())
    }

    /// Runs one turn. Empty input is rejected without touching the
    /// transcript; otherwise the user message is appended at once and exactly
    /// one bot message follows when the round trip ends.
    pub async fn send(
        &mut self,
        text: &str,
        image_base64: Option<String>,
    ) -> Result<TurnOutcome, TransportError> {
        if text.trim().is_empty() && image_base64.is_none() {
            return Err(TransportError::Validation(
                "Type a message or attach an image first".to_string(),
            ));
        }

        self.phase = TurnPhase::Sending;
        self.transcript.append(Message::user(
            text,
            image_base64.clone(),
            Some(self.category.clone()),
        ));

        let outcome = match self.round_trip(text, image_base64).await {
            Ok(reply) => {
                debug!(images = reply.image_urls.len(), "bot reply received");
                self.transcript
                    .append(Message::bot(reply.clean_text, reply.image_urls));
                TurnOutcome::Replied
            }
            Err(e) => {
                error!("Error communicating with backend: {}", e);
                let (notice, redirect) = self.describe_failure(&e);
                self.transcript.append(Message::bot_error(notice));
                TurnOutcome::Failed { error: e, redirect }
            }
        };

        self.phase = TurnPhase::Composing;
        Ok(outcome)
    }

    /// Starts the periodic token check for as long as the returned watcher lives.
    pub fn watch_session(&self) -> (LivenessWatcher, mpsc::Receiver<SessionEvent>) {
        LivenessWatcher::spawn(
            self.state.guard.clone(),
            self.state.sessions().clone(),
            self.state.config.token_check_interval,
        )
    }

    /// Called when the watcher reports the token gone mid-conversation.
    pub fn session_ended(&mut self) -> LoginRedirect {
        info!("session ended during chat");
        self.transcript.append(Message::bot_error(SESSION_ENDED_NOTICE));
        self.login_redirect()
    }

    async fn round_trip(
        &self,
        text: &str,
        image_base64: Option<String>,
    ) -> Result<SanitizedReply, TransportError> {
        let session = self.state.sessions().load()?;
        let token = session
            .token
            .filter(|t| !t.is_empty())
            .ok_or(TransportError::Unauthenticated)?;

        if !self.state.guard.is_session_valid(&token).await {
            self.state.sessions().invalidate()?;
            return Err(TransportError::SessionExpired);
        }

        let payload = encode(&ChatRequest {
            message: text.to_string(),
            image_base64,
            category: self.category.clone(),
            email: session.email,
        })?;

        let value = self
            .state
            .api
            .send(Method::POST, "/api/chat", Some(&payload), Some(&token))
            .await?;

        let response: ChatResponse = decode(value)?;
        let raw = response
            .response
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                TransportError::InvalidResponse(
                    "Received invalid response from server".to_string(),
                )
            })?;

        Ok(self.state.sanitizer.sanitize(&raw))
    }

    fn describe_failure(&self, e: &TransportError) -> (String, Option<LoginRedirect>) {
        if e.requires_login() {
            (e.to_string(), Some(self.login_redirect()))
        } else {
            (format!("Error: {e}"), None)
        }
    }

    fn login_redirect(&self) -> LoginRedirect {
        LoginRedirect {
            after: self.state.config.redirect_delay,
        }
    }
}
