//! Quiz generation and delivery.
//!
//! A completion model writes the multiple-choice questions, the questions
//! (without answers) go to the chat channel, and the full quiz is archived
//! in the notes database.

pub mod discord;
pub mod format;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

pub use discord::DiscordWebhook;
pub use format::QuizText;
pub use gemini::GeminiClient;

/// Text completion service that writes quizzes.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Complete `prompt` and return the raw model text.
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}

/// A single chat post.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub title: String,
    pub body: String,
    pub color: u32,
    pub footer: String,
}

/// Chat channel the questions are posted to.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn post(&self, message: &ChatMessage) -> Result<(), String>;
}
