//! Data model types

mod purchase;
mod show;

pub use purchase::*;
pub use show::*;
