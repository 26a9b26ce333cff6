//! Entity structs for fbdesk domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `fb-db/migrations/001_feedback.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod feedback;

pub use feedback::Feedback;
