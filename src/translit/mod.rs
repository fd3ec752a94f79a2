//! Layout transliteration between Latin (US QWERTY) and Ukrainian (ЙЦУКЕН)
//!
//! The character table is built once at startup, validated as a bijection,
//! and shared read-only with everything that needs lookups.

mod direction;
mod engine;
mod table;

pub use direction::{detect, Direction};
pub use engine::Transliterator;
pub use table::{CharMap, MapError};
