//! `dioca-cli` — terminal front end for the inventory session.
//!
//! The [`controller::Controller`] owns the session and turns every outcome
//! into [`notice::Notice`]s; [`repl`] is the only module that touches the
//! terminal.

pub mod action;
pub mod config;
pub mod controller;
pub mod notice;
pub mod render;
pub mod repl;

pub use action::{Action, ActionParseError};
pub use config::{AppConfig, Args};
pub use controller::{Controller, Response, Screen};
pub use notice::Notice;
