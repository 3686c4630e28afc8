//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the snipeit-bot:
//! - Chat services (e.g., Slack)
//! - Inventory services (e.g., Snipe-IT)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod inventory;
