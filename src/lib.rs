//! Hierarchical target allocation planning.
//!
//! A portfolio is modelled as portfolio → asset class → fund → holding.
//! Levels 1-3 carry percentage targets of their parent, holdings carry
//! currency amounts. From those amounts the crate derives the total wealth
//! the targets imply, the amount currently held and the remaining gap.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
