/// Card color normalization
///
/// Cards are rendered with one of five palette tokens. The stored card color
/// is free text and may hold legacy aliases, so the token shown to clients is
/// derived on every read from the card's color and its list:
///
/// 1. a well-known list title wins ("In Progress", "Review", "Ideas", "Done", "Inbox")
/// 2. otherwise the list accent, if it is a token
/// 3. otherwise the card color, if it is a token or a known alias
/// 4. otherwise `primary`
///
/// The result is never written back. Renaming a list re-colors its cards on the
/// next read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical palette token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    #[default]
    Primary,
    Warning,
    Accent,
    Success,
    Inbox,
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::Primary => "primary",
            ColorToken::Warning => "warning",
            ColorToken::Accent => "accent",
            ColorToken::Success => "success",
            ColorToken::Inbox => "inbox",
        }
    }

    /// Parses an exact token name (already lowercased and trimmed)
    fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(ColorToken::Primary),
            "warning" => Some(ColorToken::Warning),
            "accent" => Some(ColorToken::Accent),
            "success" => Some(ColorToken::Success),
            "inbox" => Some(ColorToken::Inbox),
            _ => None,
        }
    }

    /// Parses a token or a legacy card color alias
    fn from_card_color(value: &str) -> Option<Self> {
        Self::from_canonical(value).or(match value {
            "inprogress" | "progress" => Some(ColorToken::Primary),
            "idea" | "ideas" => Some(ColorToken::Accent),
            "done" | "complete" | "completed" => Some(ColorToken::Success),
            "review" => Some(ColorToken::Warning),
            _ => None,
        })
    }

    fn from_list_title(value: &str) -> Option<Self> {
        match value {
            "in progress" => Some(ColorToken::Primary),
            "review" => Some(ColorToken::Warning),
            "ideas" => Some(ColorToken::Accent),
            "done" => Some(ColorToken::Success),
            "inbox" => Some(ColorToken::Inbox),
            _ => None,
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn canonical(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Maps a card color and its list into a palette token
///
/// # Example
///
/// ```
/// use kanban_shared::policy::color::{normalize_color, ColorToken};
///
/// assert_eq!(normalize_color("anything", "In Progress", "whatever"), ColorToken::Primary);
/// assert_eq!(normalize_color("done", "Custom", ""), ColorToken::Success);
/// assert_eq!(normalize_color("", "Custom", ""), ColorToken::Primary);
/// ```
pub fn normalize_color(current: &str, list_title: &str, list_accent: &str) -> ColorToken {
    ColorToken::from_list_title(&canonical(list_title))
        .or_else(|| ColorToken::from_canonical(&canonical(list_accent)))
        .or_else(|| ColorToken::from_card_color(&canonical(current)))
        .unwrap_or_default()
}
