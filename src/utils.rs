//! # Utility functions
//!
//! Small helpers shared by the subcommands: deriving sample names from file
//! paths, checking that inputs can be opened, and writing output files so that
//! they only appear once they are complete.
use anyhow::{Context, Result};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile};

use crate::error::ValidationError;

/// Infer a sample name from the filepath of a results file
///
/// # Examples
///
/// ```
/// let filepath = "./path/to/sample_01.bed";
/// let sample_name = asisite::utils::sample_name_from_path(filepath).unwrap();
///
/// assert_eq!("sample_01", sample_name);
/// ```
pub fn sample_name_from_path(filepath: &str) -> Result<String> {
    let context = || format!("Could not infer sample name from path {filepath}");
    let name = Path::new(filepath)
        .file_stem()
        .with_context(context)?
        .to_str()
        .with_context(context)?;

    Ok(String::from(name))
}

/// Open `path` for reading, reporting failure as [`ValidationError::UnreadableInput`].
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|e| {
        ValidationError::UnreadableInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write to a temporary file next to `path` and move it into place once `write`
/// returns successfully. On error the temporary file is removed and `path` is
/// left untouched. The file gets the same permissions `File::create` would give it.
pub fn write_atomically<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // requested mode is masked by the umask on creation, like File::create
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(&dir)
        .with_context(|| format!("Could not create temporary file in {}", dir.display()))?;

    write(&mut tmp)?;

    tmp.persist(path)
        .with_context(|| format!("Could not write output file {}", path.display()))?;
    Ok(())
}
