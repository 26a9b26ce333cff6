//! Repository methods, implemented as `impl FeedbackService` blocks.

pub mod feedback;

pub use feedback::InsertCursor;
