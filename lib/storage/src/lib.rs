//! # Pep-Talk Storage
//!
//! File-backed stores for the Pep-Talk service:
//!
//! - [`Content`] - Compound catalog, goals and search synonyms read at startup
//! - [`SavedStackStore`] - Users' named stacks (`saved_stacks.json`)
//! - [`SubmissionQueue`] - Community submissions awaiting moderation (`submissions.json`)
//!
//! Every write replaces its document atomically.

pub mod content;
pub mod json_file;
pub mod manager;
pub mod saved_stacks;
pub mod submissions;

pub use content::Content;
pub use manager::StorageManager;
pub use saved_stacks::{SavedStack, SavedStackStore, StackInput};
pub use submissions::{EntityType, Submission, SubmissionInput, SubmissionQueue, SubmissionStatus};
