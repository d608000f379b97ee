//! RoomSense - polling client and popup presenter for a room sensor dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod poll;
pub mod popup;
