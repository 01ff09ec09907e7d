pub mod manual_entry;

pub use manual_entry::{FallbackReason, ManualEntryPolicy, MIN_KEYWORD_LENGTH};
