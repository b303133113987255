// The fixed set of condition-grade columns carried by every inspection.
//
// Column labels come from a Norwegian export, so one of them (`Bæ`) is not
// ASCII and some exports mangle it further. Code paths use the ASCII `code`
// as the identifier and only ever *match* against the labels.
use crate::error::ReportError;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const RATING_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingField {
    Fl,
    Sk,
    Eu,
    Mu,
    Le,
    Bae,
    Is,
    Kb,
    Au,
    Be,
    Fu,
    Af,
    Up,
    An,
}

impl RatingField {
    /// Source column order.
    pub const ALL: [RatingField; RATING_COUNT] = [
        RatingField::Fl,
        RatingField::Sk,
        RatingField::Eu,
        RatingField::Mu,
        RatingField::Le,
        RatingField::Bae,
        RatingField::Is,
        RatingField::Kb,
        RatingField::Au,
        RatingField::Be,
        RatingField::Fu,
        RatingField::Af,
        RatingField::Up,
        RatingField::An,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// ASCII identifier, safe for file names, flags and JSON keys.
    pub fn code(self) -> &'static str {
        match self {
            RatingField::Fl => "Fl",
            RatingField::Sk => "Sk",
            RatingField::Eu => "Eu",
            RatingField::Mu => "Mu",
            RatingField::Le => "Le",
            RatingField::Bae => "Bae",
            RatingField::Is => "Is",
            RatingField::Kb => "Kb",
            RatingField::Au => "Au",
            RatingField::Be => "Be",
            RatingField::Fu => "Fu",
            RatingField::Af => "Af",
            RatingField::Up => "Up",
            RatingField::An => "An",
        }
    }

    /// Column header as it appears in the source table.
    pub fn label(self) -> &'static str {
        match self {
            RatingField::Bae => "Bæ",
            other => other.code(),
        }
    }

    /// Every header spelling accepted for this column.
    pub fn header_aliases(self) -> &'static [&'static str] {
        match self {
            RatingField::Bae => &["Bæ", "BÃ¦", "Bae"],
            RatingField::Fl => &["Fl"],
            RatingField::Sk => &["Sk"],
            RatingField::Eu => &["Eu"],
            RatingField::Mu => &["Mu"],
            RatingField::Le => &["Le"],
            RatingField::Is => &["Is"],
            RatingField::Kb => &["Kb"],
            RatingField::Au => &["Au"],
            RatingField::Be => &["Be"],
            RatingField::Fu => &["Fu"],
            RatingField::Af => &["Af"],
            RatingField::Up => &["Up"],
            RatingField::An => &["An"],
        }
    }

    pub fn codes() -> String {
        Self::ALL
            .iter()
            .map(|f| f.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Lowercased code and every alias -> field.
static LOOKUP: Lazy<HashMap<String, RatingField>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for field in RatingField::ALL {
        map.insert(field.code().to_lowercase(), field);
        for alias in field.header_aliases() {
            map.insert(alias.to_lowercase(), field);
        }
    }
    map
});

impl FromStr for RatingField {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        LOOKUP
            .get(&key)
            .copied()
            .ok_or_else(|| ReportError::UnknownRating(s.trim().to_string(), RatingField::codes()))
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
