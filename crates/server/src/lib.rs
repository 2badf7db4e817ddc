//! jshop server library.
//!
//! This crate provides the HTTP service as a library, allowing it to be
//! tested end-to-end without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod seed;
pub mod state;
