//! Interactive REPL for the Wanderpal client
//!
//! Provides a readline-based chat interface with:
//! - Command history
//! - Slash commands for auth, conversations, trips, trending, profile
//! - Ctrl+C cancellation of an in-flight chat task

mod cards;
mod commands;
pub mod colors;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::api::types::Role;
use crate::auth::AuthClient;
use crate::chat::{ChatClient, TaskObservation};
use crate::config;
use crate::conversations::{Conversations, Message};
use crate::error::ClientError;
use crate::profile::ProfileClient;
use crate::session::SessionStore;
use crate::trending::TrendingCache;
use crate::trips::TripsClient;

use self::colors::ansi::*;

/// REPL state
pub struct Repl {
    /// Readline editor with history
    editor: DefaultEditor,
    session: Arc<SessionStore>,
    conversations: Arc<Conversations>,
    chat: ChatClient,
    auth: AuthClient,
    trending: TrendingCache,
    profile: ProfileClient,
    trips: TripsClient,
    /// Visible transcript, insertion order preserved
    messages: Vec<Message>,
    /// Cancels the active poll loop; replaced after each cancellation and
    /// on conversation switch
    cancel: CancellationToken,
    /// History file path
    history_path: PathBuf,
    /// Fallback coordinates for /trending
    default_location: Option<(f64, f64)>,
}

/// Build the REPL from the shared clients and run it until exit
pub async fn run(
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    conversations: Arc<Conversations>,
    chat: ChatClient,
    trending: TrendingCache,
    default_location: Option<(f64, f64)>,
) -> Result<()> {
    let auth = AuthClient::new(Arc::clone(&api), Arc::clone(&session));
    let profile = ProfileClient::new(Arc::clone(&api), Arc::clone(&session));
    let trips = TripsClient::new(api, Arc::clone(&session));

    let mut repl = Repl {
        editor: DefaultEditor::new()?,
        session,
        conversations,
        chat,
        auth,
        trending,
        profile,
        trips,
        messages: Vec::new(),
        cancel: CancellationToken::new(),
        history_path: config::data_dir().join("chat_history"),
        default_location,
    };

    repl.run().await
}

fn synthetic_error(detail: &str) -> String {
    format!(
        "I'm sorry, I encountered an error: {}. Please try again.",
        detail
    )
}

impl Repl {
    /// Run the REPL loop
    async fn run(&mut self) -> Result<()> {
        self.load_history_file();

        let token = self.session.token().await.ok().flatten();
        let list = self.conversations.refresh(token.as_deref()).await;
        if !list.is_empty() {
            println!(
                "{}",
                colors::status(&format!(
                    "{} previous conversations (/conversations to list)",
                    list.len()
                ))
            );
        }

        self.messages = match self.session.current_conversation().await {
            Ok(Some(id)) => self.conversations.load_history(&id, token.as_deref()).await,
            _ => vec![Message::welcome()],
        };
        self.render_transcript();

        println!("Type your message (Ctrl+D to exit, /help for commands)");
        println!();

        loop {
            let line = match self.editor.readline(&colors::prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.editor.add_history_entry(&line)?;

            if trimmed.starts_with('/') {
                if !self.handle_command(trimmed).await? {
                    break;
                }
                continue;
            }

            self.send_message(trimmed).await;
        }

        self.cancel.cancel();
        self.save_history_file();
        Ok(())
    }

    /// Submit a message and poll for the answer. Failures become synthetic
    /// assistant messages; nothing is retried.
    async fn send_message(&mut self, text: &str) {
        let user = Message::user(text);
        self.render_message(&user);
        self.messages.push(user);

        let submitted = self.chat.submit(text).await;
        let outcome = match submitted {
            Ok(outcome) => outcome,
            Err(e) => {
                self.push_assistant(&synthetic_error(&e.to_string()));
                return;
            }
        };

        if outcome.conversation_created {
            println!(
                "{}",
                colors::status(&format!("conversation {}", outcome.conversation_id))
            );
        }

        cards::render_agent_workflow();

        let result = {
            let cancel = self.cancel.clone();
            let wait = self.chat.wait_for_result(&outcome.task_id, &cancel);
            tokio::pin!(wait);

            tokio::select! {
                result = &mut wait => result,
                _ = tokio::signal::ctrl_c() => {
                    cancel.cancel();
                    wait.await
                }
            }
        };

        match result {
            Ok(TaskObservation::Done(answer)) => self.push_assistant(&answer),
            Ok(TaskObservation::Failed(detail)) => {
                self.push_assistant(&synthetic_error(&detail))
            }
            Ok(TaskObservation::Pending) => {}
            Err(ClientError::Cancelled) => {
                println!("{}", colors::warning("request cancelled"));
                self.cancel = CancellationToken::new();
            }
            Err(e) => self.push_assistant(&synthetic_error(&e.to_string())),
        }
    }

    fn push_assistant(&mut self, content: &str) {
        let message = Message::assistant(content);
        self.render_message(&message);
        self.messages.push(message);
    }

    fn render_message(&self, message: &Message) {
        let (label, color) = match message.role {
            Role::User => ("you", GREEN),
            Role::Assistant => ("wanderpal", CYAN),
        };
        println!(
            "{}{}{}{} {}",
            BOLD,
            color,
            label,
            RESET,
            colors::status(&message.created_at.format("%H:%M").to_string())
        );
        println!("{}", message.content);
        println!();
    }

    fn render_transcript(&self) {
        println!("{}", colors::separator(50));
        for message in &self.messages {
            self.render_message(message);
        }
    }

    /// Cancel any active poll loop and hand out a fresh token
    fn reset_poll(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
    }

    fn load_history_file(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    fn save_history_file(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }
}
