#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod data;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
