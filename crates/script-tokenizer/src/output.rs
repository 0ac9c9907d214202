/// Allocation of generated output files

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TokenizerError};
use crate::options::TOK_SUFFIX;

/// A generated file opened for writing
#[derive(Debug)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub file: File,
}

/// Where the tokenized copy of `script` is written: `output_dir/<name>.tok`
pub fn destination_path(script: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = script
        .file_name()
        .ok_or_else(|| TokenizerError::InvalidScriptPath(script.to_path_buf()))?;

    let mut name = name.to_os_string();
    name.push(TOK_SUFFIX);
    Ok(output_dir.join(name))
}

/// Create the output file for `script`
///
/// The output directory is created if missing. Without `clobber` an existing
/// destination is an error and is left untouched. The new file carries the
/// permission bits of `script`.
pub fn allocate(script: &Path, output_dir: &Path, clobber: bool) -> Result<GeneratedFile> {
    let path = destination_path(script, output_dir)?;
    let permissions = fs::metadata(script)
        .map_err(|e| TokenizerError::io(script, e))?
        .permissions();

    if !output_dir.exists() {
        debug!("Creating output directory {}", output_dir.display());
        fs::create_dir_all(output_dir).map_err(|e| TokenizerError::io(output_dir, e))?;
    }

    let mut open = OpenOptions::new();
    open.write(true);
    if clobber {
        open.create(true).truncate(true);
    } else {
        open.create_new(true);
    }

    let file = open.open(&path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => TokenizerError::OutputExists(path.clone()),
        _ => TokenizerError::io(&path, e),
    })?;
    file.set_permissions(permissions)
        .map_err(|e| TokenizerError::io(&path, e))?;

    Ok(GeneratedFile { path, file })
}
