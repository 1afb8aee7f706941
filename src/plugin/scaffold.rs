//! Vigilfile scaffolding.
//!
//! Seeds a fresh configuration file and appends per-plugin initializer
//! templates, preferring a registered factory's template over a
//! user-supplied one.

use crate::core::{Error, Result};
use crate::plugin::resolver::PluginResolver;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Contents written into a freshly scaffolded Vigilfile.
pub const VIGILFILE_SEED: &str = "\
# A sample Vigilfile
# More info at https://github.com/vigil-rs/vigil

# plugin \"log\"
";

/// Directory searched for user-supplied initializer templates.
pub fn user_template_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vigil").join("templates"))
}

/// Write a seed Vigilfile at `path`.
///
/// When the file already exists: abort with
/// [`Error::VigilfileExists`] if `abort_on_existence` is set, otherwise
/// silently do nothing. Returns whether a file was written.
pub fn create_vigilfile(path: &Path, abort_on_existence: bool) -> Result<bool> {
    if path.exists() {
        if abort_on_existence {
            return Err(Error::VigilfileExists(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "vigilfile present, leaving untouched");
        return Ok(false);
    }

    fs::write(path, VIGILFILE_SEED)?;
    tracing::info!(path = %path.display(), "vigilfile created");
    Ok(true)
}

/// Append a plugin's initializer template to a Vigilfile.
///
/// Tries the registered factory's embedded template first, then a
/// user-supplied file named after the identifier under `template_dir`.
/// Fails with a single diagnostic naming both attempted locations when
/// neither exists.
pub fn insert_template(
    resolver: &PluginResolver,
    identifier: &str,
    vigilfile: &Path,
    template_dir: Option<&Path>,
) -> Result<()> {
    let user_template = template_dir.map(|dir| dir.join(identifier));

    let template = match resolver.template_for(identifier) {
        Some(template) => template.to_string(),
        None => match read_user_template(user_template.as_deref()) {
            Some(template) => template,
            None => {
                let attempted = vec![
                    format!("registered factory template for '{identifier}'"),
                    user_template
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "no user template directory".to_string()),
                ];
                return Err(Error::TemplateNotFound {
                    identifier: identifier.to_string(),
                    attempted,
                });
            }
        },
    };

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(vigilfile)?;
    file.write_all(template.as_bytes())?;
    tracing::info!(plugin = identifier, path = %vigilfile.display(), "template inserted");
    Ok(())
}

fn read_user_template(path: Option<&Path>) -> Option<String> {
    let path = path?;
    fs::read_to_string(path).ok()
}
