//! Use cases and repository trait definitions for Pricewatch.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the owner-scoped product service, and the
//! platform-independent part of the chat front end. It depends only on
//! `pricewatch-types` -- never on `pricewatch-infra` or any database/IO crate.

pub mod chat;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;
