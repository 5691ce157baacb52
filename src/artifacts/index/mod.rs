//! Index file format
//!
//! The index (staging area) stores the content of every staged file,
//! waiting to be committed. It is persisted as a JSON map keyed by
//! repository-relative path:
//!
//! ```text
//! {
//!   "src/main.rs": {
//!     "hash": "<sha1 of the original bytes>",
//!     "timestamp": 1700000000.25,
//!     "content": "<text, or base64 when binary>",
//!     "binary": false
//!   }
//! }
//! ```

pub mod index_entry;
