//! gemchat is a terminal chat client for the Gemini generateContent API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state, the turn controller that drives a
//!   request from prompt to reply, the HTTP client and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that feeds key presses into the controller.
//! - [`api`] defines the request and response payloads of the endpoint.
//! - [`utils`] holds URL building, clipboard access and logging setup.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions and [`cli::say`] for one-shot prompts.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
