// src/lib.rs

//! Observer results scraper library.
//!
//! Fetches a live results page, recovers result rows from its text and
//! writes a JSON + CSV snapshot.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
