use std::path::PathBuf;

use vndgen_compiler::ArtifactKind;

use super::loader::{Inputs, load_generator, write_output};

pub struct GenerateArgs {
    pub kind: ArtifactKind,
    pub inputs: Inputs,
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) {
    if let Err(msg) = generate(&args) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }
}

/// Render the whole artifact before writing, so a failure leaves no output.
pub fn generate(args: &GenerateArgs) -> Result<(), String> {
    let generator = load_generator(&args.inputs)?;
    let text = generator.generate(args.kind).map_err(|e| e.to_string())?;
    tracing::info!(artifact = %args.kind, bytes = text.len(), "generated");
    write_output(args.output.as_deref(), &text)
}
