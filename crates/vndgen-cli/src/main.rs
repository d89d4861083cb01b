mod cli;
mod commands;
mod logging;

use cli::{CheckParams, GenerateParams, build_cli};
use vndgen_compiler::ArtifactKind;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("header", m)) => {
            let params = GenerateParams::from_matches(ArtifactKind::Header, m);
            logging::init(params.verbose);
            commands::generate::run(params.into());
        }
        Some(("source", m)) => {
            let params = GenerateParams::from_matches(ArtifactKind::Source, m);
            logging::init(params.verbose);
            commands::generate::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            logging::init(params.verbose);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
