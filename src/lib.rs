#![allow(clippy::collapsible_if)]

pub mod catalog;
pub mod config;
pub mod parser;
pub mod runtime;
pub mod strategies;
pub mod tools;

#[cfg(test)]
mod tests;
