//! Library catalog application over the bibhash engine
//!
//! Modules:
//! - **`args`**: command-line flags, the conf-file fallback and the
//!   cross-flag validation the flag grammar cannot express
//! - **`book`**: the catalog record with reservation and due-date rules
//! - **`catalog`**: the pipe-delimited `library.dat` reader and writer
//! - **`menu`**: the interactive colored console loop
//! - **`logger`**: one-shot `env_logger` initialization

pub mod args;
pub mod book;
pub mod catalog;
pub mod logger;
pub mod menu;
