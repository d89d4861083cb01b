//! Reading input files and writing artifacts.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use vndgen_compiler::{Generator, PolicyFormat, ProfileKind};
use vndgen_core::Source;

/// Files and overrides shared by every command.
#[derive(Clone, Debug)]
pub struct Inputs {
    pub policy_path: PathBuf,
    pub xml_paths: Vec<PathBuf>,
    pub profile: Option<ProfileKind>,
    pub policy_format: Option<PolicyFormat>,
}

/// Read the policy and descriptions, and apply the profile override.
pub fn load_generator(inputs: &Inputs) -> Result<Generator, String> {
    let policy_text = read_file(&inputs.policy_path)?;
    let policy_origin = inputs.policy_path.display().to_string();

    let mut descriptions = Vec::with_capacity(inputs.xml_paths.len());
    for path in &inputs.xml_paths {
        descriptions.push((path.display().to_string(), read_file(path)?));
    }

    let format = inputs
        .policy_format
        .unwrap_or_else(|| PolicyFormat::from_path(&inputs.policy_path));
    tracing::debug!(
        policy = %policy_origin,
        descriptions = descriptions.len(),
        ?format,
        "loaded inputs"
    );

    let generator = Generator::from_sources(
        Source::new(&policy_origin, &policy_text),
        format,
        descriptions
            .iter()
            .map(|(origin, text)| Source::new(origin, text)),
    )
    .map_err(|e| e.to_string())?;

    Ok(match inputs.profile {
        Some(kind) => generator.profile_kind(kind),
        None => generator,
    })
}

/// Write `text` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, text)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("failed to write stdout: {}", e))
        }
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
