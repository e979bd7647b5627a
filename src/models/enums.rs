//! Enums for card classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical card type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Ancestor,
    Celestial,
    Clock,
    Event,
    Follower,
    Holding,
    Item,
    Other,
    Personality,
    Proxy,
    Region,
    Ring,
    Sensei,
    Spell,
    Strategy,
    Stronghold,
    Territory,
    Wind,
}

impl CardType {
    pub const ALL: [CardType; 18] = [
        CardType::Ancestor,
        CardType::Celestial,
        CardType::Clock,
        CardType::Event,
        CardType::Follower,
        CardType::Holding,
        CardType::Item,
        CardType::Other,
        CardType::Personality,
        CardType::Proxy,
        CardType::Region,
        CardType::Ring,
        CardType::Sensei,
        CardType::Spell,
        CardType::Strategy,
        CardType::Stronghold,
        CardType::Territory,
        CardType::Wind,
    ];

    /// Display name as stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Ancestor => "Ancestor",
            CardType::Celestial => "Celestial",
            CardType::Clock => "Clock",
            CardType::Event => "Event",
            CardType::Follower => "Follower",
            CardType::Holding => "Holding",
            CardType::Item => "Item",
            CardType::Other => "Other",
            CardType::Personality => "Personality",
            CardType::Proxy => "Proxy",
            CardType::Region => "Region",
            CardType::Ring => "Ring",
            CardType::Sensei => "Sensei",
            CardType::Spell => "Spell",
            CardType::Strategy => "Strategy",
            CardType::Stronghold => "Stronghold",
            CardType::Territory => "Territory",
            CardType::Wind => "Wind",
        }
    }

    /// Whether the raw ability text of this type opens with a keyword line
    pub fn has_keyword_line(&self) -> bool {
        matches!(self, CardType::Personality | CardType::Sensei)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown card type: {}", s))
    }
}

/// Deck a card type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deck {
    Dynasty,
    Fate,
    Other,
    #[serde(rename = "Pre-Game")]
    PreGame,
}

impl Deck {
    pub const ALL: [Deck; 4] = [Deck::Dynasty, Deck::Fate, Deck::Other, Deck::PreGame];

    pub fn as_str(&self) -> &'static str {
        match self {
            Deck::Dynasty => "Dynasty",
            Deck::Fate => "Fate",
            Deck::Other => "Other",
            Deck::PreGame => "Pre-Game",
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Deck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Deck::ALL
            .iter()
            .find(|d| d.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown deck: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_round_trips_through_display() {
        for card_type in CardType::ALL {
            assert_eq!(card_type.to_string().parse::<CardType>(), Ok(card_type));
        }
    }

    #[test]
    fn test_pre_game_serializes_with_hyphen() {
        let json = serde_json::to_string(&Deck::PreGame).unwrap();
        assert_eq!(json, "\"Pre-Game\"");
        assert_eq!("Pre-Game".parse::<Deck>(), Ok(Deck::PreGame));
    }

    #[test]
    fn test_keyword_line_types() {
        assert!(CardType::Personality.has_keyword_line());
        assert!(CardType::Sensei.has_keyword_line());
        assert!(!CardType::Holding.has_keyword_line());
    }
}
