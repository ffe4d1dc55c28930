//! Read-only index-side tables the engine consumes

mod primary_keys;

pub use primary_keys::PrimaryKeys;
