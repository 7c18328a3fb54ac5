//! Pressa - A lightweight blog publishing engine
//!
//! This library provides the core functionality for the Pressa blog engine.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
