use anyhow::Result;
use log::info;
use std::path::Path;

use crate::runtime::Runtime;

mod browse;
pub mod config;
mod list;
mod render;
mod stats;

pub use browse::{BrowseEvent, browse};
pub use list::{format_repository_line, list};
pub use render::render;
pub use stats::stats;

/// Write `text` to `output`, or to stdout when no path is given.
pub(crate) fn emit<R: Runtime>(runtime: &R, output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !runtime.exists(parent) {
                    runtime.create_dir_all(parent)?;
                }
            }
            runtime.write(path, text.as_bytes())?;
            info!("Wrote {}", path.display());
        }
        None => runtime.print(text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn test_emit_to_stdout() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_print()
            .with(eq("<html></html>"))
            .times(1)
            .return_const(());

        emit(&runtime, None, "<html></html>").unwrap();
    }

    #[test]
    fn test_emit_creates_missing_parent() {
        let mut runtime = MockRuntime::new();
        let output = PathBuf::from("/site/public/index.html");

        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/site/public")))
            .returning(|_| false);
        runtime
            .expect_create_dir_all()
            .with(eq(PathBuf::from("/site/public")))
            .times(1)
            .returning(|_| Ok(()));
        runtime
            .expect_write()
            .withf(|path, contents| {
                path == Path::new("/site/public/index.html") && contents == b"page"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        emit(&runtime, Some(&output), "page").unwrap();
    }

    #[test]
    fn test_emit_relative_file_skips_directory_creation() {
        let mut runtime = MockRuntime::new();

        runtime
            .expect_write()
            .times(1)
            .returning(|_, _| Ok(()));

        emit(&runtime, Some(Path::new("index.html")), "page").unwrap();
    }
}
