//! Mapping direction detection

use serde::{Deserialize, Serialize};

use super::table::CharMap;

/// Which side of the table a text is converted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Latin layout text retyped as Ukrainian
    ForwardToReverse,
    /// Ukrainian layout text retyped as Latin
    ReverseToForward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::ForwardToReverse => write!(f, "latin->ukrainian"),
            Direction::ReverseToForward => write!(f, "ukrainian->latin"),
        }
    }
}

/// Pick the direction for a text sample
///
/// Counts characters that are forward keys and characters that are reverse
/// keys; reverse wins only on a strict majority. A character present on both
/// sides (`.` and `,`) counts for both. Ties, including text with no mapped
/// characters at all, resolve to `ForwardToReverse`.
pub fn detect(map: &CharMap, text: &str) -> Direction {
    let (forward, reverse) = text.chars().fold((0usize, 0usize), |(a, b), c| {
        (
            a + usize::from(map.is_forward_key(c)),
            b + usize::from(map.is_reverse_key(c)),
        )
    });

    if reverse > forward {
        Direction::ReverseToForward
    } else {
        Direction::ForwardToReverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> CharMap {
        CharMap::ukrainian().unwrap()
    }

    #[test]
    fn test_latin_text() {
        assert_eq!(detect(&map(), "ghbdsn"), Direction::ForwardToReverse);
    }

    #[test]
    fn test_ukrainian_text() {
        assert_eq!(detect(&map(), "руддщ"), Direction::ReverseToForward);
        assert_eq!(detect(&map(), "Привіт, світе"), Direction::ReverseToForward);
    }

    #[test]
    fn test_empty_and_unmapped_default_forward() {
        assert_eq!(detect(&map(), ""), Direction::ForwardToReverse);
        assert_eq!(detect(&map(), "   "), Direction::ForwardToReverse);
        assert_eq!(detect(&map(), "123 !@#"), Direction::ForwardToReverse);
    }

    #[test]
    fn test_tie_resolves_forward() {
        assert_eq!(detect(&map(), "aб"), Direction::ForwardToReverse);
    }

    #[test]
    fn test_shared_punctuation_counts_both_sides() {
        // '.' is a forward key (ю) and a reverse key (/)
        assert_eq!(detect(&map(), "..."), Direction::ForwardToReverse);
        assert_eq!(detect(&map(), "я."), Direction::ReverseToForward);
    }

    #[test]
    fn test_majority_wins_in_mixed_text() {
        assert_eq!(detect(&map(), "ab цук"), Direction::ReverseToForward);
        assert_eq!(detect(&map(), "abc ц"), Direction::ForwardToReverse);
    }
}
