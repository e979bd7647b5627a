//! Static lookup tables for catalog codes
//!
//! Translates the raw codes found in the source catalog into the canonical
//! display values stored in card documents:
//! - Card type codes and their deck buckets
//! - Clan codes
//! - Edition acronyms
//! - Rarity codes
//! - Legality codes and the groups the legacy client displays them in
//! - Bracketed ability-text tokens and their short-codes
//!
//! All tables are built once on first use and shared read-only.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::{CardType, Deck};

/// Raw type code -> canonical card type
pub static TYPE_MAPPING: Lazy<HashMap<&'static str, CardType>> = Lazy::new(|| {
    HashMap::from([
        ("ancestor", CardType::Ancestor),
        ("celestial", CardType::Celestial),
        ("clock", CardType::Clock),
        ("event", CardType::Event),
        ("follower", CardType::Follower),
        ("holding", CardType::Holding),
        ("item", CardType::Item),
        ("other", CardType::Other),
        ("personality", CardType::Personality),
        ("proxy", CardType::Proxy),
        ("region", CardType::Region),
        ("ring", CardType::Ring),
        ("sensei", CardType::Sensei),
        ("spell", CardType::Spell),
        ("strategy", CardType::Strategy),
        ("stronghold", CardType::Stronghold),
        ("territory", CardType::Territory),
        ("wind", CardType::Wind),
    ])
});

/// Deck buckets, keyed by deck, holding the raw type codes they contain
pub static DECK_MAPPING: &[(Deck, &[&str])] = &[
    (
        Deck::Dynasty,
        &["celestial", "event", "holding", "personality", "region"],
    ),
    (
        Deck::Fate,
        &["ancestor", "follower", "item", "ring", "spell", "strategy"],
    ),
    (Deck::Other, &["other", "clock", "territory", "proxy"]),
    (Deck::PreGame, &["stronghold", "sensei", "wind"]),
];

/// Raw clan code -> display clan, in display order
pub static CLAN_MAPPING: &[(&str, &str)] = &[
    ("akasha", "Akasha"),
    ("monk", "Brotherhood of Shinsei"),
    ("crab", "Crab"),
    ("crane", "Crane"),
    ("dragon", "Dragon"),
    ("lion", "Lion"),
    ("mantis", "Mantis"),
    ("naga", "Naga"),
    ("ninja", "Ninja"),
    ("phoenix", "Phoenix"),
    ("ratling", "Ratling"),
    ("scorpion", "Scorpion"),
    ("shadowlands", "Shadowlands"),
    ("spider", "Spider"),
    ("spirit", "Spirit"),
    ("toturi", "Toturi's Army"),
    ("unaligned", "Unaligned"),
    ("unicorn", "Unicorn"),
];

/// Edition acronym -> display set name, in release order
pub static EDITION_MAPPING: &[(&str, &str)] = &[
    ("TwentyFestivals", "Twenty Festivals"),
    ("ThA", "Thunderous Acclaim"),
    ("SCW", "Siege: Clan War"),
    ("EP", "Evil Portents"),
    ("TBS", "The Blackest Storm"),
    ("HFW", "Hidden Forest War"),
    ("Onyx", "Onyx Edition"),
    ("RoJ", "Rise of Jigoku"),
    ("RtR", "Road to Ruin"),
    ("ROU", "Rise of Otosan Uchi"),
    ("GS", "Gathering Storm"),
    ("CZE", "Cubic Zirconia Edition"),
    ("CRI", "Chaos Reigns I"),
];

/// Edition acronyms grouped by story arc, each with the rarities it was printed in
pub static EDITION_ERAS: &[(&str, &[(&str, &[&str])])] = &[
    (
        "A Brother's Destiny (Ivory)",
        &[
            (
                "TwentyFestivals",
                &["Common", "Fixed", "Premium", "Rare", "Uncommon"],
            ),
            ("ThA", &["Common", "Rare", "Uncommon"]),
            ("SCW", &["Fixed"]),
            ("EP", &["Common", "Premium", "Rare", "Uncommon"]),
            ("TBS", &["Common", "Fixed", "Rare", "Uncommon"]),
        ],
    ),
    (
        "Onyx Edition",
        &[
            ("HFW", &["Fixed"]),
            ("Onyx", &["Fixed"]),
            ("RoJ", &["Fixed"]),
            ("RtR", &["Fixed"]),
            ("ROU", &["Fixed"]),
        ],
    ),
    (
        "Shattered Empire",
        &[("GS", &["Fixed"]), ("CZE", &["Fixed"]), ("CRI", &["Fixed"])],
    ),
];

/// Rarity code -> display rarity
///
/// Codes are case-sensitive: `p` is Promo, `P` is Premium.
pub static RARITY_MAPPING: &[(&str, &str)] = &[
    ("c", "Common"),
    ("u", "Uncommon"),
    ("r", "Rare"),
    ("f", "Fixed"),
    ("p", "Promo"),
    ("P", "Premium"),
    ("n", "None"),
];

/// Rarity assigned when a card carries no rarity element at all
pub const LOWEST_RARITY: &str = "Common";

/// Legality code -> display legality
pub static LEGALITY_MAPPING: &[(&str, &str)] = &[
    ("open", "Open"),
    ("onyx", "Onyx"),
    ("shattered_empire", "Shattered Empire"),
];

/// Legality code -> group the legacy attribute lookup lists it under
pub static LEGALITY_GROUPS: &[(&str, &str)] = &[
    ("open", "Format"),
    ("onyx", "Arc"),
    ("shattered_empire", "Arc"),
];

/// Keyword that grants a Sensei every clan
pub const ALL_CLANS_MARKER: &str = "All Clans";

/// Bracketed ability-text token -> short-code
pub static TOKEN_SHORT_CODES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("BOW", "{bow}"), ("FAVOR", "{favor}")]));

/// Short-code for a `[PAY N]` token
pub fn pay_short_code(amount: &str) -> String {
    format!("{{pay:{}}}", amount)
}

/// Look up the canonical card type for a raw type code
pub fn card_type(code: &str) -> Option<CardType> {
    TYPE_MAPPING.get(code).copied()
}

/// Find the deck bucket holding a raw type code
pub fn deck_for(code: &str) -> Option<Deck> {
    DECK_MAPPING
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(deck, _)| *deck)
}

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, value)| *value)
}

/// Look up the display clan for a raw clan code
pub fn clan(code: &str) -> Option<&'static str> {
    lookup(CLAN_MAPPING, code)
}

/// Canonical display clan matching `name` case-insensitively
pub fn clan_by_name(name: &str) -> Option<&'static str> {
    CLAN_MAPPING
        .iter()
        .find(|(_, display)| display.eq_ignore_ascii_case(name))
        .map(|(_, display)| *display)
}

/// Look up the display set name for an edition acronym
pub fn edition(acronym: &str) -> Option<&'static str> {
    lookup(EDITION_MAPPING, acronym)
}

/// Look up the display rarity for a rarity code
pub fn rarity(code: &str) -> Option<&'static str> {
    lookup(RARITY_MAPPING, code)
}

/// Look up the display legality for a legality code
pub fn legality(code: &str) -> Option<&'static str> {
    lookup(LEGALITY_MAPPING, code)
}

/// Look up the legacy attribute group for a legality code
pub fn legality_group(code: &str) -> Option<&'static str> {
    lookup(LEGALITY_GROUPS, code)
}

/// Every canonical clan, in display order
pub fn all_clans() -> Vec<String> {
    CLAN_MAPPING.iter().map(|(_, name)| name.to_string()).collect()
}
