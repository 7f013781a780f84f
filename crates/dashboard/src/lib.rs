//! Pulseboard dashboard library.
//!
//! This crate provides the dashboard API as a library, allowing the router
//! to be tested in-process and spawned by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
