//! Bidirectional character table
//!
//! The forward direction maps a key typed on the US layout to the character
//! the same key produces on the Ukrainian layout. The reverse direction is
//! derived by swapping every pair, so the table must be a bijection.

use std::collections::HashMap;

/// US QWERTY key → Ukrainian layout character, for the same physical key
#[rustfmt::skip]
const LATIN_TO_UKRAINIAN: &[(char, char)] = &[
    ('q', 'й'), ('w', 'ц'), ('e', 'у'), ('r', 'к'), ('t', 'е'),
    ('y', 'н'), ('u', 'г'), ('i', 'ш'), ('o', 'щ'), ('p', 'з'),
    ('[', 'х'), (']', 'ї'), ('a', 'ф'), ('s', 'і'), ('d', 'в'),
    ('f', 'а'), ('g', 'п'), ('h', 'р'), ('j', 'о'), ('k', 'л'),
    ('l', 'д'), (';', 'ж'), ('\'', 'є'), ('z', 'я'), ('x', 'ч'),
    ('c', 'с'), ('v', 'м'), ('b', 'и'), ('n', 'т'), ('m', 'ь'),
    (',', 'б'), ('.', 'ю'), ('/', '.'), ('\\', 'ʼ'),
    ('Q', 'Й'), ('W', 'Ц'), ('E', 'У'), ('R', 'К'), ('T', 'Е'),
    ('Y', 'Н'), ('U', 'Г'), ('I', 'Ш'), ('O', 'Щ'), ('P', 'З'),
    ('{', 'Х'), ('}', 'Ї'), ('A', 'Ф'), ('S', 'І'), ('D', 'В'),
    ('F', 'А'), ('G', 'П'), ('H', 'Р'), ('J', 'О'), ('K', 'Л'),
    ('L', 'Д'), (':', 'Ж'), ('"', 'Є'), ('Z', 'Я'), ('X', 'Ч'),
    ('C', 'С'), ('V', 'М'), ('B', 'И'), ('N', 'Т'), ('M', 'Ь'),
    ('<', 'Б'), ('>', 'Ю'), ('?', ','),
];

/// Errors raised when a pair list is not a bijection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("character {key:?} is mapped more than once")]
    DuplicateKey { key: char },

    #[error("characters {first:?} and {second:?} both map to {value:?}")]
    DuplicateValue { value: char, first: char, second: char },
}

/// Immutable forward/reverse character lookup
#[derive(Debug, Clone)]
pub struct CharMap {
    forward: HashMap<char, char>,
    reverse: HashMap<char, char>,
}

impl CharMap {
    /// Build the Latin ↔ Ukrainian keyboard layout table
    pub fn ukrainian() -> Result<Self, MapError> {
        Self::from_pairs(LATIN_TO_UKRAINIAN)
    }

    /// Build a table from forward pairs, deriving the reverse direction
    ///
    /// Every key and every value must appear exactly once; otherwise reverse
    /// lookups would depend on iteration order.
    pub fn from_pairs(pairs: &[(char, char)]) -> Result<Self, MapError> {
        let mut forward = HashMap::with_capacity(pairs.len());
        let mut reverse = HashMap::with_capacity(pairs.len());

        for &(key, value) in pairs {
            if forward.insert(key, value).is_some() {
                return Err(MapError::DuplicateKey { key });
            }
            if let Some(first) = reverse.insert(value, key) {
                return Err(MapError::DuplicateValue {
                    value,
                    first,
                    second: key,
                });
            }
        }

        Ok(Self { forward, reverse })
    }

    /// Look up the Ukrainian-layout counterpart of a Latin-layout character
    pub fn forward(&self, c: char) -> Option<char> {
        self.forward.get(&c).copied()
    }

    /// Look up the Latin-layout counterpart of a Ukrainian-layout character
    pub fn reverse(&self, c: char) -> Option<char> {
        self.reverse.get(&c).copied()
    }

    pub fn is_forward_key(&self, c: char) -> bool {
        self.forward.contains_key(&c)
    }

    pub fn is_reverse_key(&self, c: char) -> bool {
        self.reverse.contains_key(&c)
    }

    /// Number of mapped pairs
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_bijection() {
        let map = CharMap::ukrainian().unwrap();
        assert_eq!(map.len(), LATIN_TO_UKRAINIAN.len());
        assert_eq!(map.reverse.len(), map.forward.len());
    }

    #[test]
    fn test_forward_round_trip() {
        let map = CharMap::ukrainian().unwrap();
        for &(key, _) in LATIN_TO_UKRAINIAN {
            let mapped = map.forward(key).unwrap();
            assert_eq!(map.reverse(mapped), Some(key), "round trip for {key:?}");
        }
    }

    #[test]
    fn test_reverse_round_trip() {
        let map = CharMap::ukrainian().unwrap();
        for &(_, value) in LATIN_TO_UKRAINIAN {
            let mapped = map.reverse(value).unwrap();
            assert_eq!(map.forward(mapped), Some(value), "round trip for {value:?}");
        }
    }

    #[test]
    fn test_known_lookups() {
        let map = CharMap::ukrainian().unwrap();
        assert_eq!(map.forward('g'), Some('п'));
        assert_eq!(map.forward('\\'), Some('ʼ'));
        assert_eq!(map.forward('?'), Some(','));
        assert_eq!(map.reverse('Ї'), Some('}'));
        assert_eq!(map.reverse('.'), Some('/'));
    }

    #[test]
    fn test_unmapped_characters() {
        let map = CharMap::ukrainian().unwrap();
        for c in [' ', '1', '!', '\n', 'ё', '😀'] {
            assert_eq!(map.forward(c), None);
            assert_eq!(map.reverse(c), None);
        }
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let err = CharMap::from_pairs(&[('a', 'x'), ('b', 'x')]).unwrap_err();
        assert_eq!(
            err,
            MapError::DuplicateValue {
                value: 'x',
                first: 'a',
                second: 'b'
            }
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = CharMap::from_pairs(&[('a', 'x'), ('a', 'y')]).unwrap_err();
        assert_eq!(err, MapError::DuplicateKey { key: 'a' });
    }

    #[test]
    fn test_empty_table() {
        let map = CharMap::from_pairs(&[]).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.forward('a'), None);
    }
}
