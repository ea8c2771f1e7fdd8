//! Slash command handlers for the REPL
//!
//! Handles /help, /signin, /signup, /conversations, /switch, /new,
//! /trips, /trending, /profile, /hotels, /status, /quit.

use anyhow::Result;

use crate::conversations::Message;

use super::{Repl, cards, colors};

impl Repl {
    /// Handle a slash command; returns false when the REPL should exit
    pub(super) async fn handle_command(&mut self, cmd: &str) -> Result<bool> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts[0];
        let args = &parts[1..];

        match command {
            "/help" => {
                println!("Commands:");
                println!("  /help                      - Show this help");
                println!("  /version                   - Show version info");
                println!("  /signin <email> <password> - Sign in");
                println!("  /signup                    - Create an account");
                println!("  /signout                   - Sign out");
                println!("  /conversations             - List previous conversations");
                println!("  /switch <n|id>             - Open a conversation");
                println!("  /new                       - Start a new conversation");
                println!("  /history                   - Re-print the transcript");
                println!("  /trips                     - Show your trips");
                println!("  /trending [lat lon]        - Trending places near you");
                println!("  /profile                   - Show your profile");
                println!("  /profile set <field> <value> - Edit a profile field");
                println!("  /hotels                    - Sample hotel recommendations");
                println!("  /status                    - Show session state");
                println!("  /quit                      - Exit");
            }
            "/version" => {
                println!("Wanderpal v{}", env!("CARGO_PKG_VERSION"));
            }
            "/signin" => self.cmd_signin(args).await,
            "/signup" => self.cmd_signup().await,
            "/signout" => self.cmd_signout().await,
            "/conversations" => self.cmd_conversations().await,
            "/switch" => self.cmd_switch(args.first().copied()).await,
            "/new" => self.cmd_new().await,
            "/history" => self.render_transcript(),
            "/trips" => self.cmd_trips().await,
            "/trending" => self.cmd_trending(args).await,
            "/profile" => self.cmd_profile(args).await,
            "/hotels" => cards::render_hotels(cards::sample_hotels()),
            "/status" => self.cmd_status().await,
            "/quit" | "/exit" => return Ok(false),
            _ => {
                println!("Unknown command: {} (try /help)", command);
            }
        }

        Ok(true)
    }

    async fn cmd_signin(&mut self, args: &[&str]) {
        let [email, password] = args else {
            println!("Usage: /signin <email> <password>");
            return;
        };

        match self.auth.sign_in(email, password).await {
            Ok(()) => {
                println!("{}", colors::success(&format!("Signed in as {}", email)));
                let token = self.session.token().await.ok().flatten();
                let list = self.conversations.refresh(token.as_deref()).await;
                if !list.is_empty() {
                    println!(
                        "{}",
                        colors::status(&format!("{} previous conversations", list.len()))
                    );
                }
            }
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    async fn cmd_signup(&mut self) {
        let Some(form) = self.read_signup_form() else {
            println!("{}", colors::warning("sign-up cancelled"));
            return;
        };

        match self.auth.sign_up(form).await {
            Ok(()) => println!("{}", colors::success("Account created, you are signed in.")),
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    fn read_signup_form(&mut self) -> Option<crate::auth::SignUpForm> {
        Some(crate::auth::SignUpForm {
            first_name: self.prompt_line("First name: ")?,
            last_name: self.prompt_line("Last name: ")?,
            phone: self.prompt_line("Phone: ")?,
            email: self.prompt_line("Email: ")?,
            password: self.prompt_line("Password: ")?,
            confirm_password: self.prompt_line("Confirm password: ")?,
        })
    }

    fn prompt_line(&mut self, label: &str) -> Option<String> {
        self.editor.readline(label).ok()
    }

    async fn cmd_signout(&mut self) {
        self.reset_poll();
        match self.auth.sign_out(&self.trending).await {
            Ok(()) => {
                self.messages = vec![Message::welcome()];
                println!("{}", colors::success("Signed out."));
            }
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    async fn cmd_conversations(&mut self) {
        let token = self.session.token().await.ok().flatten();
        let list = self.conversations.refresh(token.as_deref()).await;

        if list.is_empty() {
            println!("No previous conversations.");
            return;
        }

        for (i, conversation) in list.iter().enumerate() {
            println!(
                "  {:>3}. {}  {}",
                i + 1,
                conversation.title,
                colors::status(&conversation.created_at.format("%Y-%m-%d").to_string())
            );
        }
    }

    async fn cmd_switch(&mut self, arg: Option<&str>) {
        let Some(arg) = arg else {
            println!("Usage: /switch <number|conversation-id>");
            return;
        };

        // Accept a 1-based index into the last listed conversations, or a
        // raw conversation id
        let entries = self.conversations.entries();
        let id = match arg.parse::<usize>() {
            Ok(n) if n >= 1 && n <= entries.len() => entries[n - 1].id.clone(),
            _ => arg.to_string(),
        };

        self.reset_poll();

        if let Err(e) = self.session.set_current_conversation(&id).await {
            println!("{}", colors::error(&e.to_string()));
            return;
        }

        let token = self.session.token().await.ok().flatten();
        self.messages = self.conversations.load_history(&id, token.as_deref()).await;
        self.render_transcript();
    }

    async fn cmd_new(&mut self) {
        self.reset_poll();
        if let Err(e) = self.session.clear_current_conversation().await {
            println!("{}", colors::error(&e.to_string()));
            return;
        }
        self.messages = vec![Message::welcome()];
        self.render_transcript();
    }

    async fn cmd_trips(&mut self) {
        match self.trips.list().await {
            Ok(trips) if trips.is_empty() => println!("No trips yet."),
            Ok(trips) => {
                for trip in trips {
                    println!(
                        "  {}  {} — {}  {}",
                        colors::header(&trip.destination),
                        trip.check_in,
                        trip.check_out,
                        colors::status(trip.status.as_deref().unwrap_or("planned"))
                    );
                    if let Some(hotel) = trip.hotel_name {
                        println!("       {}", colors::status(&hotel));
                    }
                }
            }
            Err(e) => println!("{}", colors::warning(&e.to_string())),
        }
    }

    async fn cmd_trending(&mut self, args: &[&str]) {
        let location = match args {
            [lat, lon] => match (lat.parse::<f64>(), lon.parse::<f64>()) {
                (Ok(lat), Ok(lon)) => Some((lat, lon)),
                _ => None,
            },
            [] => self.default_location,
            _ => None,
        };

        let Some((lat, lon)) = location else {
            println!("Usage: /trending <lat> <lon> (or set latitude/longitude in config)");
            return;
        };

        let email = self.session.email().await.ok().flatten();
        match self.trending.get_or_fetch(email.as_deref(), lat, lon).await {
            Ok(places) if places.is_empty() => println!("No trending places found."),
            Ok(places) => {
                for place in places {
                    let locality = place
                        .address
                        .as_ref()
                        .and_then(|a| a.locality())
                        .unwrap_or("");
                    println!("  {}  {}", colors::header(&place.name), colors::status(locality));
                    if let Some(blurb) = place.wikipedia_extracts.or(place.kinds) {
                        println!("       {}", colors::status(&blurb));
                    }
                    if let Some(link) = place.otm {
                        println!("       {}", colors::status(&link));
                    }
                }
            }
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    async fn cmd_profile(&mut self, args: &[&str]) {
        match args {
            [] => match self.profile.fetch().await {
                Ok(profile) => {
                    println!(
                        "  {} {}",
                        colors::header(&profile.first_name),
                        colors::header(&profile.last_name)
                    );
                    println!("  {}", profile.email);
                    println!("  {}", profile.phone);
                    if let Some(location) = profile.location {
                        println!("  {}", location);
                    }
                }
                Err(e) => println!("{}", colors::warning(&e.to_string())),
            },
            ["set", field, rest @ ..] if !rest.is_empty() => {
                let value = rest.join(" ");
                self.cmd_profile_set(field, &value).await;
            }
            _ => println!("Usage: /profile  or  /profile set <field> <value>"),
        }
    }

    async fn cmd_profile_set(&mut self, field: &str, value: &str) {
        let mut profile = match self.profile.fetch().await {
            Ok(profile) => profile,
            Err(e) => {
                println!("{}", colors::warning(&e.to_string()));
                return;
            }
        };

        match field {
            "first_name" => profile.first_name = value.to_string(),
            "last_name" => profile.last_name = value.to_string(),
            "phone" => profile.phone = value.to_string(),
            "location" => profile.location = Some(value.to_string()),
            _ => {
                println!("Unknown field: {} (first_name, last_name, phone, location)", field);
                return;
            }
        }

        match self.profile.update(&profile).await {
            Ok(_) => println!("{}", colors::success("Profile updated.")),
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    async fn cmd_status(&mut self) {
        let email = self.session.email().await.ok().flatten();
        let conversation = self.session.current_conversation().await.ok().flatten();

        println!(
            "  Signed in    {}",
            email.as_deref().unwrap_or("no (anonymous)")
        );
        println!(
            "  Conversation {}",
            conversation.as_deref().unwrap_or("none (new chat)")
        );
        println!(
            "  Chat task    {}",
            if self.chat.is_in_flight() {
                "in flight"
            } else {
                "idle"
            }
        );
        println!("  Transcript   {} messages", self.messages.len());
    }
}
