//! Gamerec Core Library
//!
//! Content-based game recommendation: catalog rows are discretized, their
//! genres and tags combined into normalized token strings, scored pairwise
//! with cosine or Jaccard similarity, and queried for the nearest items.

pub mod catalog;
pub mod combine;
pub mod config;
pub mod db;
pub mod discretize;
pub mod error;
pub mod format;
pub mod item;
pub mod logging;
pub mod pipeline;
pub mod recommend;
pub mod records;
pub mod similarity;
pub mod store;
