//! Tri-state nullable values for Dynamics 365 Web API payloads
//!
//! [`Nullable`] tells apart a column that was left out, one explicitly set to
//! `null`, and one carrying a value. [`record`] applies the same rules to
//! untyped JSON records and [`operation`] builds write bodies from typed
//! patches.

pub mod nullable;
pub mod operation;
pub mod record;

pub use nullable::Nullable;
pub use operation::Operation;
pub use record::{FieldState, field_state, read_field, write_field};
