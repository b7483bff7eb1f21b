// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `hydronet` binary.

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    hydronet_cli::entrypoint()
}
