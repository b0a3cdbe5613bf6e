//! Keyset ("cursor") pagination engine for ordered relational query results.
//!
//! Given a sort specification, a page size, and a cursor marking a row's
//! position in that ordering, the engine computes a boundary predicate
//! selecting the adjacent page, decides how many rows to fetch (including
//! lookahead rows), and reassembles the fetched rows into a page with
//! has-previous/has-next flags. The engine never executes queries itself;
//! hosts implement [`Executor`] and render the emitted [`Predicate`] and
//! effective order into their own query language.

#[macro_use]
extern crate cfg_if;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate serde;

mod assemble;
mod cursor;
mod env;
mod error;
mod order;
mod plan;
mod predicate;
mod query;
mod render;

pub use crate::assemble::*;
pub use crate::cursor::*;
pub use crate::env::*;
pub use crate::error::*;
pub use crate::order::*;
pub use crate::plan::*;
pub use crate::predicate::*;
pub use crate::query::*;
pub use crate::render::*;

cfg_if! { if #[cfg(feature = "memory")] {
    mod mem;
    pub use crate::mem::*;
} }
