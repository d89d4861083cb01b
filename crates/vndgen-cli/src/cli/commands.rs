//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vndgen")
        .about("Vendor dispatch stub generator for GLX and EGL")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(header_command())
        .subcommand(source_command())
        .subcommand(check_command())
}

fn with_input_args(cmd: Command) -> Command {
    cmd.arg(policy_path_arg())
        .arg(xml_paths_arg())
        .arg(profile_arg())
        .arg(policy_format_arg())
        .arg(verbose_arg())
}

/// Print the dispatch header.
pub fn header_command() -> Command {
    let cmd = Command::new("header")
        .about("Generate the dispatch header (index enum and prototypes)")
        .override_usage("  vndgen header <POLICY> <XML>... [-o <FILE>]")
        .after_help(
            r#"EXAMPLES:
  vndgen header glx.toml glx.xml glxext.xml
  vndgen header egl.json egl.xml --profile egl -o g_egldispatchstubs.h"#,
        )
        .arg(output_file_arg());
    with_input_args(cmd)
}

/// Print the dispatch source.
pub fn source_command() -> Command {
    let cmd = Command::new("source")
        .about("Generate dispatch stubs and the name/function tables")
        .override_usage("  vndgen source <POLICY> <XML>... [-o <FILE>]")
        .after_help(
            r#"EXAMPLES:
  vndgen source glx.toml glx.xml glxext.xml
  vndgen source egl.json egl.xml --profile egl -o g_egldispatchstubs.c"#,
        )
        .arg(output_file_arg());
    with_input_args(cmd)
}

/// Resolve the policy without emitting anything.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a policy against API descriptions")
        .override_usage("  vndgen check <POLICY> <XML>...")
        .after_help(
            r#"EXAMPLES:
  vndgen check glx.toml glx.xml glxext.xml
  vndgen check egl.toml egl.xml -v"#,
        );
    with_input_args(cmd)
}
