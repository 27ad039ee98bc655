//! Profanity and sensitive topic detection.
//!
//! The profanity matcher was inspired by the `censor` crate:
//! <https://github.com/kaikalii/censor/blob/3fc7d5ae2b707cb621a58c48fbff064223890e6b/src/lib.rs#L1>
//! but unlike it, it reports the byte spans of the matches in the original
//! text, which allows for censoring the text without losing its formatting.

mod category;
mod censor;
mod error;
mod filter;
mod matcher;
mod normalize;

pub use category::*;
pub use censor::*;
pub use error::*;
pub use filter::*;
pub use matcher::*;
