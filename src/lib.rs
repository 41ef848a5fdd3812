//! SoulBuddy - astrology companion client
//!
//! Talks to the SoulBuddy backend for kundali charts, horoscopes, chat and
//! recommendations, renders birth-chart diagrams locally, and exposes each page
//! interaction as an MCP tool.

pub mod api;
pub mod chart;
pub mod config;
pub mod models;
pub mod pages;
pub mod server;
pub mod state;

pub use server::SoulBuddyServer;
