//! **mazegen** generates perfect mazes and exports them as SVG images and Webots worlds.

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod renderers;
pub mod units;
