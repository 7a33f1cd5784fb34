//! Pure helpers for Knack.
//!
//! Everything in this crate is free of IO and async: text shaping, byte and
//! date formatting, throwaway ids, and lenient JSON decoding. Host-facing
//! helpers (timers, storage, clipboard) live in `knack-utils`.

mod format;
mod ids;
mod json;
mod text;
mod validate;

pub use format::{DEFAULT_BYTE_DECIMALS, format_bytes, format_bytes_with_precision, format_date};
pub use ids::{generate_id, random_between};
pub use json::{parse_json, parse_json_value};
pub use text::{capitalize, get_initials, slugify, truncate};
pub use validate::is_valid_email;
