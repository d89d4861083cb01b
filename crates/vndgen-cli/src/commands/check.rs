use vndgen_compiler::DispatchModel;

use super::loader::{Inputs, load_generator};

pub struct CheckArgs {
    pub inputs: Inputs,
}

pub fn run(args: CheckArgs) {
    match check(&args) {
        Ok(summary) => eprintln!("{}", summary),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Resolve every policy entry and describe the result.
pub fn check(args: &CheckArgs) -> Result<String, String> {
    let generator = load_generator(&args.inputs)?;
    let model = generator.resolve().map_err(|e| e.to_string())?;
    Ok(summarize(&model))
}

pub fn summarize(model: &DispatchModel<'_>) -> String {
    let functions = model.functions();
    let stubs = functions
        .iter()
        .filter(|f| f.policy.route.has_stub())
        .count();
    let guarded = functions.iter().filter(|f| f.policy.guard.is_some()).count();
    format!(
        "ok: {} functions, {} stubs, {} guarded ({} profile)",
        functions.len(),
        stubs,
        guarded,
        model.profile().kind()
    )
}
