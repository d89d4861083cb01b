//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the generate and check commands
//! declare their inputs identically.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Policy file (first positional).
pub fn policy_path_arg() -> Arg {
    Arg::new("policy_path")
        .value_name("POLICY")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Dispatch policy file (TOML or JSON)")
}

/// API description files (remaining positionals).
pub fn xml_paths_arg() -> Arg {
    Arg::new("xml_paths")
        .value_name("XML")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Khronos-style API description XML files, merged in order")
}

/// Profile preset (--profile).
pub fn profile_arg() -> Arg {
    Arg::new("profile")
        .long("profile")
        .value_name("PROFILE")
        .value_parser(["glx", "egl"])
        .help("Target profile (overrides [target].profile)")
}

/// Policy file format (--policy-format).
pub fn policy_format_arg() -> Arg {
    Arg::new("policy_format")
        .long("policy-format")
        .value_name("FORMAT")
        .value_parser(["toml", "json"])
        .help("Policy file format (inferred from extension if not specified)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug, -vvv for trace)")
}
