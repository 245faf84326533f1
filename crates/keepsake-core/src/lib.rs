//! Keepsake Core — shared domain types and ports.
//!
//! This crate defines the action keys, the progress record, screen
//! descriptions and the two ports the flow engine drives: the
//! `ScreenPresenter` and the `ProgressGateway`. It contains no
//! infrastructure code.

pub mod action;
pub mod error;
pub mod gateway;
pub mod presenter;
pub mod progress;
pub mod screen;
