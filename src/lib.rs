// src/lib.rs
//! Live plotting of MPU accelerometer/gyroscope telemetry received over UDP.
//!
//! `drivers` holds the headless pipeline (decode, derive, rolling store); `engine`
//! and `gui` wire it to a worker thread and an egui window.
pub mod config;
pub mod drivers;
pub mod engine;
pub mod gui;
pub mod types;
