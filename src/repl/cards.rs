//! Static sample content for the chat view
//!
//! Hotel ranking is mocked client-side: the agent workflow indicator and
//! the sample recommendation cards render canned data, while real answers
//! come from the backend task result.

use super::colors::{self, ansi::*};

/// One step of the mocked agent workflow
pub const AGENTS: [(&str, &str); 4] = [
    ("Search Agent", "Finding hotels in your destination"),
    ("Pricing Agent", "Comparing prices and deals"),
    ("Ranking Agent", "Analyzing ratings and reviews"),
    ("Safety Agent", "Checking safety and security"),
];

/// A mocked hotel recommendation card
pub struct HotelCard {
    pub name: &'static str,
    pub rating: f32,
    pub price: u32,
    pub location: &'static str,
    pub features: &'static [&'static str],
    pub why_chosen: &'static str,
}

/// Canned recommendations shown by the /hotels command
pub fn sample_hotels() -> &'static [HotelCard] {
    static HOTELS: [HotelCard; 2] = [
        HotelCard {
            name: "The Grand Plaza Hotel",
            rating: 4.8,
            price: 289,
            location: "Downtown Paris",
            features: &["Pool", "Spa", "Free WiFi", "Restaurant"],
            why_chosen: "Perfect location near Eiffel Tower with exceptional reviews for \
cleanliness and service.",
        },
        HotelCard {
            name: "Boutique Charm Suites",
            rating: 4.6,
            price: 195,
            location: "Marais District",
            features: &["Free Breakfast", "Balcony", "Pet Friendly"],
            why_chosen: "Authentic Parisian experience in historic neighborhood with great \
value for money.",
        },
    ];
    &HOTELS
}

/// Print the agent-status indicator shown while a chat task runs
pub fn render_agent_workflow() {
    println!("{}", colors::status("AI agents working..."));
    for (name, description) in AGENTS {
        println!("  {}{}{}  {}", CYAN, name, RESET, colors::status(description));
    }
}

/// Print hotel recommendation cards
pub fn render_hotels(hotels: &[HotelCard]) {
    for hotel in hotels {
        println!("{}", colors::separator(50));
        println!(
            "{}  {}${}/night{}",
            colors::header(hotel.name),
            BOLD,
            hotel.price,
            RESET
        );
        println!(
            "  {}★ {:.1}{}  {}",
            YELLOW,
            hotel.rating,
            RESET,
            colors::status(hotel.location)
        );
        println!("  {}", colors::status(&hotel.features.join(" · ")));
        println!("  {}", hotel.why_chosen);
    }
    println!("{}", colors::separator(50));
}
