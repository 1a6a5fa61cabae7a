//! VTech Payments - checkout and webhook processing core
//!
//! This crate turns catalog offerings into signed gateway checkout sessions
//! and applies verified gateway webhook events to service orders.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
