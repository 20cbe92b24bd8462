//! Keyword tables for industry/audience/location/content scoring.
//!
//! Spanish and English terms mixed deliberately; the brand's market posts in
//! both. All matching is done on lowercased text.

/// Craft-beer industry terms. Strongest industry signal (15 pts each).
pub const BEER_KEYWORDS: &[&str] = &[
    "cerveza", "beer", "craft", "artesanal", "brewery", "brewing", "hop", "malta",
];

/// Food / hospitality terms (10 pts each).
pub const FOOD_KEYWORDS: &[&str] = &[
    "comida", "food", "gastronomy", "cocina", "restaurant", "resto", "bar", "pub",
];

/// Experience / venue-atmosphere terms (5 pts each).
pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "terraza", "ambiente", "music", "live", "evento", "event",
];

/// Caption-level experience markers used by the content-style scorer.
/// "celebr" intentionally matches celebrar/celebración/celebrating.
pub const EXPERIENCE_CAPTION_KEYWORDS: &[&str] = &[
    "ambiente", "experiencia", "música", "live", "evento", "celebr",
];

/// Location terms for the target market (Santiago metro area).
pub const LOCATION_KEYWORDS: &[&str] = &[
    "santiago", "providencia", "las condes", "vitacura", "ñuñoa", "chile",
];

/// Terms that qualify an account as a bar/restaurant prospect at all.
pub const PROSPECT_KEYWORDS: &[&str] = &[
    "bar", "resto", "restaurant", "pub", "cerveza", "beer", "gastronomy", "gastronomia",
    "cocina", "kitchen", "food", "comida", "drinks", "tragos", "cocktails", "terrace",
    "terraza", "bistro", "cafe", "brewery", "cerveceria",
];

/// Terms that mark an obviously personal (non-venue) account.
pub const PERSONAL_ACCOUNT_KEYWORDS: &[&str] = &[
    "personal", "blog", "influencer", "model", "artist",
];

/// Hashtag-relevance tables: beer industry, the brand's music identity, and
/// local geography. Matched as substrings of the bare (no `#`) tag.
pub const RELEVANCE_BEER: &[&str] = &[
    "cerveza", "beer", "artesanal", "craft", "brewing", "brew", "hop", "malta",
    "lager", "ale", "ipa",
];

pub const RELEVANCE_MUSIC: &[&str] = &["rock", "music", "musica", "metal", "punk", "alternativo"];

pub const RELEVANCE_LOCATION: &[&str] = &["chile", "chilena", "santiago", "maipu"];

/// The brand's own hashtag set; direct membership means full relevance.
pub const BRAND_HASHTAGS: &[&str] = &[
    "cervezaartesanal",
    "cervezaartesanalchilena",
    "cerveza",
    "rock",
    "maipú",
    "santiago",
    "craftbeer",
    "beer",
    "cervecería",
];

/// Case-insensitive "any keyword is a substring of `text`" check.
/// Callers pass already-lowercased text.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}
