//! Chat front-end logic, independent of any messaging platform.
//!
//! `command` executes a parsed chat command against the product service and
//! produces the reply texts; `format` renders entries; `paginate` packs
//! entries into size-bounded messages.

pub mod command;
pub mod format;
pub mod paginate;
