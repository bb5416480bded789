//! Display helpers shared by the presenters.

pub mod date;
pub mod decimal;

pub use date::{nice_date, NiceDate};
pub use decimal::{lighten_zeros, AmountParts};
