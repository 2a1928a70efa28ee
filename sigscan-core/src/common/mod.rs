//! Common utilities shared across language profiles.
//!
//! Everything here is language-neutral: profiles decide which helper to apply
//! and with which window or delimiter set.

mod blocks;
mod context;
mod params;

pub use blocks::{matching_brace, Block, BlockMap};
pub use context::{
    ends_with_char, ends_with_member_access, ends_with_word, text_before, LineIndex,
};
pub use params::{collapse_whitespace, split_top_level, top_level_assign};
