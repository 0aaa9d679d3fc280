//! Opening and saving maps on disk
//!
//! These helpers do the caller's side of the codec contract for the common
//! case where a map and its supplements are files in one directory: pick the
//! codec, locate the supplementary files, and hand everything to the codec.

use gamemaps_core::Map;
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{open_checked, FormatError, FormatRegistry, MapType, RegistryConfig, SuppFilenames, SuppStreams};

/// A map opened from disk, with what is needed to save it again
#[derive(Debug)]
pub struct OpenedMap<'a> {
    pub map: Map,
    pub codec: &'a dyn MapType,
    /// Supplement filenames, resolved against the primary file's directory
    pub supplements: SuppFilenames,
}

/// Open the map at `path`.
///
/// With `code` the codec is looked up directly; without it the format is
/// auto-detected, accepting a `possibly` match only if `config` allows it.
/// Supplement filenames are matched case-insensitively in the same directory.
pub fn open_map_file<'a>(
    registry: &'a FormatRegistry,
    path: &Path,
    code: Option<&str>,
    config: &RegistryConfig,
) -> Result<OpenedMap<'a>, FormatError> {
    let mut file = File::open(path)?;

    let codec = match code {
        Some(code) => registry
            .get_by_code(code)
            .ok_or_else(|| FormatError::UnknownFormat(code.to_string()))?,
        None => registry
            .best_match(&mut file, config.detect.accept_possibly)?
            .ok_or_else(|| FormatError::UnknownFormat(path.display().to_string()))?,
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = parent_dir(path);

    let wanted = codec.required_supplements(&mut file, &filename)?;
    file.rewind()?;

    let mut supps = SuppStreams::new();
    let mut resolved = SuppFilenames::new();
    for (kind, name) in wanted {
        let Some(supp_path) = find_sibling(dir, &name)? else {
            debug!("Supplement {} ('{}') not found in {}", kind, name, dir.display());
            return Err(FormatError::MissingSupplement(kind));
        };
        supps.insert(kind.clone(), File::open(&supp_path)?);
        resolved.insert(kind, supp_path.to_string_lossy().into_owned());
    }

    let map = open_checked(codec, &mut file, &filename, &mut supps)?;
    info!(
        "Opened {} as '{}' with {} supplement(s)",
        path.display(),
        codec.code(),
        resolved.len()
    );

    Ok(OpenedMap {
        map,
        codec,
        supplements: resolved,
    })
}

/// Encode `map` with `codec` and write it to `path` plus its supplements.
///
/// `supplements` maps each supplement kind to its output path, normally the
/// one returned by [`open_map_file`]. Every output is first written to a
/// temporary file beside its target; targets are only replaced once all of
/// them have been written, so a failure leaves existing files untouched.
pub fn save_map_file(
    codec: &dyn MapType,
    map: &Map,
    path: &Path,
    supplements: &SuppFilenames,
) -> Result<(), FormatError> {
    let encoded = codec.write(map)?;

    let mut targets = vec![(path.to_path_buf(), &encoded.primary)];
    for (kind, bytes) in &encoded.supplements {
        let target = supplements
            .get(kind)
            .ok_or_else(|| FormatError::MissingSupplement(kind.clone()))?;
        targets.push((PathBuf::from(target), bytes));
    }

    let mut staged = Vec::with_capacity(targets.len());
    for (target, bytes) in targets {
        let mut tmp = NamedTempFile::new_in(parent_dir(&target))?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        staged.push((tmp, target));
    }
    for (tmp, target) in staged {
        tmp.persist(&target).map_err(|e| FormatError::Io(e.error))?;
    }

    info!("Saved {} as '{}'", path.display(), codec.code());
    Ok(())
}

/// Directory holding `path`. A bare file name lives in the current directory.
fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Find `name` in `dir`, falling back to a case-insensitive match.
///
/// Old games rarely agree on filename case, and the files often come from
/// case-insensitive filesystems.
fn find_sibling(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
    let exact = dir.join(name);
    if exact.is_file() {
        return Ok(Some(exact));
    }
    if !dir.is_dir() {
        return Ok(None);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().eq_ignore_ascii_case(name) && entry.path().is_file() {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}
