use std::fmt;

/// JLPT proficiency level. N5 is the easiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [Self::N5, Self::N4, Self::N3, Self::N2, Self::N1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N5 => "N5",
            Self::N4 => "N4",
            Self::N3 => "N3",
            Self::N2 => "N2",
            Self::N1 => "N1",
        }
    }

    /// Parse the stored column value (`"N5"`..`"N1"`).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HSK level 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HskLevel(u8);

impl HskLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Stored column value (`"1"`..`"6"`).
    pub fn as_str(self) -> &'static str {
        ["1", "2", "3", "4", "5", "6"][usize::from(self.0 - 1)]
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok().and_then(Self::new)
    }
}

impl fmt::Display for HskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of a word table and its example rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Japanese,
    Chinese,
}

impl Language {
    /// Tag stored in `examples.language`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Japanese => "Japanese",
            Self::Chinese => "Chinese",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jlpt_parse_round_trip() {
        for level in JlptLevel::ALL {
            assert_eq!(JlptLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(JlptLevel::parse("n5"), None);
        assert_eq!(JlptLevel::parse(""), None);
    }

    #[test]
    fn test_hsk_range() {
        assert!(HskLevel::new(0).is_none());
        assert!(HskLevel::new(7).is_none());
        assert_eq!(HskLevel::new(3).map(HskLevel::as_str), Some("3"));
        assert_eq!(HskLevel::parse("6").map(HskLevel::number), Some(6));
        assert_eq!(HskLevel::parse("x"), None);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::Japanese.tag(), "ja");
        assert_eq!(Language::Chinese.tag(), "zh");
    }
}
