//! Built-in topic catalogue.
//!
//! Any string is accepted as a topic; these are the categories offered by
//! `landing-crew topics`, mirroring common app store sections.

/// Known topics, in display order. The first entry is the default.
pub const TOPICS: [&str; 24] = [
    "Books",
    "Business",
    "Developer Tools",
    "Education",
    "Entertainment",
    "Finance",
    "Food & Drink",
    "Games",
    "Graphics",
    "Health",
    "Lifestyle",
    "Medical",
    "Music",
    "News",
    "Other",
    "Photo & Video",
    "Productivity",
    "Reference",
    "Shopping",
    "Social",
    "Sports",
    "Travel",
    "Utilities",
    "Weather",
];

/// Topic used when none is given.
pub const DEFAULT_TOPIC: &str = TOPICS[0];

/// Whether `topic` is in the catalogue (case-insensitive).
pub fn is_known(topic: &str) -> bool {
    TOPICS.iter().any(|t| t.eq_ignore_ascii_case(topic.trim()))
}
