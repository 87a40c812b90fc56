//! Scripted auto-reply chat used for demos
//!
//! Each customer message schedules a single delayed business reply. A new
//! message replaces the pending reply, and dropping the simulator (unmounting
//! the screen) cancels it.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::Rng;
use shared::{ChatMessage, ChatSender};
use tokio::task::JoinHandle;

use crate::config::ChatConfig;

const WELCOME: &str = "Hi! Thanks for reaching out. How can we help you today?";

#[derive(Debug, Default)]
struct ChatState {
    messages: Vec<ChatMessage>,
    typing: bool,
}

pub struct ChatSimulator {
    state: Arc<Mutex<ChatState>>,
    delay_ms: RangeInclusive<u64>,
    pending: Option<JoinHandle<()>>,
}

impl ChatSimulator {
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_delay(
            Duration::from_millis(config.min_reply_delay_ms),
            Duration::from_millis(config.max_reply_delay_ms),
        )
    }

    pub fn with_delay(min: Duration, max: Duration) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let state = ChatState {
            messages: vec![ChatMessage::new(ChatSender::Business, WELCOME)],
            typing: false,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            delay_ms: min.as_millis() as u64..=max.as_millis() as u64,
            pending: None,
        }
    }

    /// Append a customer message and schedule the reply. Must be called from
    /// within a Tokio runtime. Blank messages are ignored.
    pub fn send(&mut self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let message = ChatMessage::new(ChatSender::Customer, text);
        {
            let mut state = lock(&self.state);
            state.messages.push(message.clone());
            state.typing = true;
        }

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let delay = Duration::from_millis(rand::thread_rng().gen_range(self.delay_ms.clone()));
        let reply = scripted_reply(text);
        let state = Arc::clone(&self.state);

        tracing::debug!("Scheduling chat reply in {:?}", delay);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            state
                .messages
                .push(ChatMessage::new(ChatSender::Business, reply));
            state.typing = false;
        }));

        Some(message)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.state).messages.clone()
    }

    /// The business side is "typing" a reply
    pub fn is_typing(&self) -> bool {
        lock(&self.state).typing
    }
}

impl Drop for ChatSimulator {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

fn lock(state: &Mutex<ChatState>) -> MutexGuard<'_, ChatState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Pick the canned reply for a customer message. Keywords match whole words.
pub fn scripted_reply(text: &str) -> &'static str {
    let text = text.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mentions = |phrases: &[&str]| phrases.iter().any(|phrase| contains_phrase(&words, phrase));

    if mentions(&[
        "price", "prices", "cost", "costs", "how much", "discount", "voucher", "vouchers",
    ]) {
        "Our prices are listed on our profile. Ask us about current vouchers for a discount!"
    } else if mentions(&["open", "opening", "hours", "close", "closing", "what time"]) {
        "We are open Monday to Saturday, 8am to 6pm."
    } else if mentions(&["deliver", "delivery", "shipping", "pickup"]) {
        "We deliver within the city in 1-2 days. Pickup is also available."
    } else if mentions(&["hello", "hi", "hey", "good morning", "good afternoon"]) {
        "Hello! What can we do for you?"
    } else {
        "Thanks for your message! A team member will get back to you shortly."
    }
}

fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let phrase: Vec<&str> = phrase.split_whitespace().collect();
    words.windows(phrase.len()).any(|window| window == phrase.as_slice())
}
