//! Web form for summarizing text with pretrained models.
//!
//! ```text
//! form submit ──→ Input Resolver ──→ Summarizer ──→ ModelCache ──→ inference API
//!      ↑                                                               │
//!      └──────────── FormReducer ←── SummaryCompleted / Failed ←───────┘
//! ```

pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod ui;
