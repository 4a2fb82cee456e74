//! Runtime abstraction for system operations.
//!
//! Commands reach the environment, the file system and the terminal only
//! through [`Runtime`], so they can be driven by a mock in tests.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File system operations (read, write, directory)
//! - `user` - Terminal interaction (output, line input)

mod env;
mod fs;
mod user;

use anyhow::Result;
use std::env as std_env;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    // Terminal
    /// Write `text` to stdout followed by a newline.
    fn print(&self, text: &str);

    /// Show `prompt` and read one line from stdin, without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&self, prompt: &str) -> Result<Option<String>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn print(&self, text: &str) {
        self.print_impl(text)
    }

    fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        self.read_line_impl(prompt)
    }
}
