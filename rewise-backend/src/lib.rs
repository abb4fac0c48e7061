//! Rewise: quiz notes from a Notion database on a spaced-repetition schedule.

pub mod config;
pub mod dashboard;
pub mod http;
pub mod pages;
pub mod quiz;
pub mod runner;
pub mod scheduler;
pub mod store;
pub mod tracking;

#[cfg(test)]
mod testing;
