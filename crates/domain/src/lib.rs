//! Domain models and core behavior for the life-update board.
//!
//! Everything here is independent of transport and storage: entity shapes,
//! form drafts with their validation rules, the per-item display⇄edit view
//! state, image-set merging, and the capability traits (access gate,
//! notifier, comment generator) implemented by outer crates.

pub mod images;
pub mod models;
pub mod services;
pub mod view;
