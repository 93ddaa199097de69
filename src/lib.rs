//! 惠貞: a scripted virtual companion whose affection and mood move with
//! keyword matches in what you say and the hour of her day.

pub mod cli;
pub mod clock;
pub mod config;
pub mod core;
pub mod display;
pub mod shell;
