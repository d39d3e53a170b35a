// Document ownership: the in-memory ResumeDocument is the source of truth
// while editing. Handlers load it (session cache first, remote default
// second, blank seed last), mutate it only through the dispatcher or the
// named sequence methods, and write the session cache back. Remote saves
// are explicit; a failed save surfaces to the caller but never rolls back
// the session.

pub mod cache;
pub mod dispatch;
pub mod handlers;
pub mod repo;
pub mod style_controller;

pub use dispatch::{apply_update, UpdateError};
pub use style_controller::StyleController;
