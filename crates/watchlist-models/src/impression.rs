use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's reaction to a title once it has been watched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Impression {
    Liked,
    Ok,
    Disliked,
}

impl Impression {
    /// Every impression, in the order they are offered to the user.
    pub const ALL: [Impression; 3] = [Impression::Liked, Impression::Ok, Impression::Disliked];

    pub fn as_str(&self) -> &'static str {
        match self {
            Impression::Liked => "liked",
            Impression::Ok => "ok",
            Impression::Disliked => "disliked",
        }
    }

    /// Badge shown on cards and buttons for watched titles
    pub fn icon(&self) -> &'static str {
        match self {
            Impression::Liked => "👍",
            Impression::Ok => "👌",
            Impression::Disliked => "👎",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Impression::Liked => "Liked",
            Impression::Ok => "Just once",
            Impression::Disliked => "Disliked",
        }
    }
}

impl fmt::Display for Impression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid impression: {0} (expected 'liked', 'ok' or 'disliked')")]
pub struct ImpressionParseError(pub String);

impl FromStr for Impression {
    type Err = ImpressionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liked" => Ok(Impression::Liked),
            "ok" => Ok(Impression::Ok),
            "disliked" => Ok(Impression::Disliked),
            _ => Err(ImpressionParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impression_from_str_accepts_only_fixed_set() {
        for impression in Impression::ALL {
            assert_eq!(impression.as_str().parse::<Impression>().unwrap(), impression);
        }
        assert!("meh".parse::<Impression>().is_err());
        assert!("Liked".parse::<Impression>().is_err());
        assert!("".parse::<Impression>().is_err());
    }

    #[test]
    fn test_impression_presentation() {
        assert_eq!(Impression::Liked.icon(), "👍");
        assert_eq!(Impression::Ok.icon(), "👌");
        assert_eq!(Impression::Disliked.icon(), "👎");
        assert_eq!(Impression::Ok.label(), "Just once");
    }
}
