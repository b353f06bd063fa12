//! Web front-end and command-line client for the employee management API.
//!
//! The server renders the sign-in, registration, password reset and user
//! management pages, keeps the session token in cookies and forwards every
//! action to the remote REST API. The CLI drives the same controllers and
//! keeps its token in a file.

pub mod api;
pub mod config;
pub mod controllers;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod templates;
pub mod utils;
pub mod validation;
