use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Pink,
    Green,
    Blue,
    White,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Self::Pink, Self::Green, Self::Blue, Self::White];

    /// Unknown names yield `None`; callers leave the current theme untouched.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pink" => Some(Self::Pink),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::White => "white",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn parse_accepts_known_names_case_insensitively() {
        assert_eq!(Theme::parse(" Pink "), Some(Theme::Pink));
        assert_eq!(Theme::parse("WHITE"), Some(Theme::White));
        assert_eq!(Theme::parse("purple"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for theme in Theme::ALL {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
    }
}
