//! Small shared helpers.

pub mod date;
mod plural;

pub use plural::plural_count;
