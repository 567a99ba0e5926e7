#![doc = "The `taskit` library crate."]
#![doc = ""]
#![doc = "Domain models, session lifecycle, repositories, routing configuration and"]
#![doc = "error handling for the taskit service. The binary (`main.rs`) wires these"]
#![doc = "together with a Postgres pool and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod usecase;

pub use crate::error::{AppError, AppResult};
pub use crate::state::{AppServices, Deadline, Repositories};
