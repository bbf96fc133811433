#![cfg(test)]

pub mod common;

mod config_tests;
mod dispatch_tests;
