//! Capability traits implemented by outer crates.

pub mod gate;
pub mod notify;

pub use gate::{AccessGate, LeaderNameGate, StaffIdGate, DEFAULT_STAFF_ID};
pub use notify::{
    BoardEvent, BoardEventKind, BoardNotifier, CommentGenerator, NotifyOutcome, SideEffectError,
};
