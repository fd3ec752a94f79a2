//! Character-by-character transliteration

use std::sync::Arc;

use super::direction::{detect, Direction};
use super::table::CharMap;

/// Applies a shared `CharMap` to text
#[derive(Debug, Clone)]
pub struct Transliterator {
    map: Arc<CharMap>,
}

impl Transliterator {
    pub fn new(map: Arc<CharMap>) -> Self {
        Self { map }
    }

    /// Map every character in the given direction, passing unmapped ones through
    ///
    /// The output always has the same number of characters as the input.
    pub fn transform(&self, text: &str, direction: Direction) -> String {
        let lookup: fn(&CharMap, char) -> Option<char> = match direction {
            Direction::ForwardToReverse => CharMap::forward,
            Direction::ReverseToForward => CharMap::reverse,
        };

        text.chars()
            .map(|c| lookup(&self.map, c).unwrap_or(c))
            .collect()
    }

    /// Detect the direction of `text` and transform it
    pub fn convert(&self, text: &str) -> (Direction, String) {
        let direction = detect(&self.map, text);
        (direction, self.transform(text, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translit() -> Transliterator {
        Transliterator::new(Arc::new(CharMap::ukrainian().unwrap()))
    }

    #[test]
    fn test_latin_to_ukrainian() {
        let t = translit();
        assert_eq!(t.transform("ghbdsn", Direction::ForwardToReverse), "привіт");
        assert_eq!(t.transform("Pryvit", Direction::ForwardToReverse), "Зкнмше");
    }

    #[test]
    fn test_ukrainian_to_latin() {
        let t = translit();
        assert_eq!(t.transform("руддщ", Direction::ReverseToForward), "hello");
    }

    #[test]
    fn test_convert_detects_direction() {
        let t = translit();
        assert_eq!(
            t.convert("ghbdsn cdsn"),
            (Direction::ForwardToReverse, "привіт світ".to_string())
        );
        assert_eq!(
            t.convert("Руддщ"),
            (Direction::ReverseToForward, "Hello".to_string())
        );
    }

    #[test]
    fn test_length_preserved() {
        let t = translit();
        let samples = ["", "a", "ghbdsn", "Привіт, світе!", "mixed текст 123 😀", "\\/?.,"];
        for s in samples {
            for d in [Direction::ForwardToReverse, Direction::ReverseToForward] {
                assert_eq!(t.transform(s, d).chars().count(), s.chars().count(), "{s:?} {d}");
            }
        }
    }

    #[test]
    fn test_unmapped_text_is_identity() {
        let t = translit();
        let s = "123 !@#$%^&*()-_=+ 😀\t\n";
        assert_eq!(t.transform(s, Direction::ForwardToReverse), s);
        assert_eq!(t.transform(s, Direction::ReverseToForward), s);
    }

    #[test]
    fn test_forward_then_reverse_restores() {
        let t = translit();
        let s = "The quick brown fox; jumps {over} <the> \"lazy\" dog?/\\";
        let there = t.transform(s, Direction::ForwardToReverse);
        assert_eq!(t.transform(&there, Direction::ReverseToForward), s);
    }

    #[test]
    fn test_fixed_direction_only_maps_its_own_side() {
        let t = translit();
        let once = t.transform("aф", Direction::ForwardToReverse);
        assert_eq!(once, "фф");
        let twice = t.transform(&once, Direction::ForwardToReverse);
        assert_eq!(twice, "фф");
        let back = t.transform(&once, Direction::ReverseToForward);
        assert_eq!(back, "aa");
    }
}
