//! Shared model and pure logic for `TaskDeck`.

pub mod credentials;
pub mod dates;
pub mod filter;
pub mod task;
pub mod validate;
