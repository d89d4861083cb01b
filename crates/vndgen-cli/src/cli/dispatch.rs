//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use vndgen_compiler::{ArtifactKind, PolicyFormat, ProfileKind};

use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::loader::Inputs;

pub struct GenerateParams {
    pub kind: ArtifactKind,
    pub policy_path: PathBuf,
    pub xml_paths: Vec<PathBuf>,
    pub profile: Option<ProfileKind>,
    pub policy_format: Option<PolicyFormat>,
    pub output: Option<PathBuf>,
    pub verbose: u8,
}

impl GenerateParams {
    pub fn from_matches(kind: ArtifactKind, m: &ArgMatches) -> Self {
        let inputs = InputParams::from_matches(m);
        Self {
            kind,
            policy_path: inputs.policy_path,
            xml_paths: inputs.xml_paths,
            profile: inputs.profile,
            policy_format: inputs.policy_format,
            output: m.get_one::<PathBuf>("output").cloned(),
            verbose: inputs.verbose,
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            kind: p.kind,
            inputs: Inputs {
                policy_path: p.policy_path,
                xml_paths: p.xml_paths,
                profile: p.profile,
                policy_format: p.policy_format,
            },
            output: p.output,
        }
    }
}

pub struct CheckParams {
    pub policy_path: PathBuf,
    pub xml_paths: Vec<PathBuf>,
    pub profile: Option<ProfileKind>,
    pub policy_format: Option<PolicyFormat>,
    pub verbose: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let inputs = InputParams::from_matches(m);
        Self {
            policy_path: inputs.policy_path,
            xml_paths: inputs.xml_paths,
            profile: inputs.profile,
            policy_format: inputs.policy_format,
            verbose: inputs.verbose,
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            inputs: Inputs {
                policy_path: p.policy_path,
                xml_paths: p.xml_paths,
                profile: p.profile,
                policy_format: p.policy_format,
            },
        }
    }
}

/// Fields every command reads.
struct InputParams {
    policy_path: PathBuf,
    xml_paths: Vec<PathBuf>,
    profile: Option<ProfileKind>,
    policy_format: Option<PolicyFormat>,
    verbose: u8,
}

impl InputParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            // Both positionals are required, so clap has already rejected
            // a command line without them.
            policy_path: m.get_one::<PathBuf>("policy_path").cloned().unwrap_or_default(),
            xml_paths: m
                .get_many::<PathBuf>("xml_paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            profile: m
                .get_one::<String>("profile")
                .and_then(|s| s.parse().ok()),
            policy_format: m
                .get_one::<String>("policy_format")
                .and_then(|s| s.parse().ok()),
            verbose: m.get_count("verbose"),
        }
    }
}
