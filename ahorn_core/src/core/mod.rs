//! Core domain models for the dataset catalog.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing dataset summaries, full dataset records and their statistics.

pub mod domain;

pub use domain::{
    Attachment, DatasetRecord, DatasetStatistics, DatasetSummary, NetworkType, NodeRange, Shape,
    StatValue,
};
