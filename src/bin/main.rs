// SPDX-License-Identifier: GPL-3.0-or-later

use crossbeam_channel::unbounded;
use makelog::output::{Consumer, JsonEventWriter};
use makelog::scanner::{discover_include_flag, CommandParser, LogReader};
use makelog::{args, config};
use std::path::Path;
use std::process::ExitCode;

/// Driver function of the application.
fn main() -> anyhow::Result<ExitCode> {
    // Initialize the logging system.
    env_logger::init();
    // Get the package name and version from Cargo
    let pkg_name = env!("CARGO_PKG_NAME");
    let pkg_version = env!("CARGO_PKG_VERSION");
    log::info!("{pkg_name} v{pkg_version}");

    // Parse the command line arguments.
    let matches = args::cli().get_matches();
    let arguments = args::Arguments::try_from(matches)?;
    log::debug!("{arguments:?}");
    // Load the configuration.
    let configuration = config::Loader::load(&arguments.config)?;
    log::debug!("{configuration:?}");

    // Probe the toolchain once; scanning proceeds without the baseline
    // flag when the probe fails.
    let baseline = if configuration.toolchain.probe {
        discover_include_flag(&configuration.toolchain.compiler)
    } else {
        None
    };

    let parser = CommandParser::new(baseline);
    let mut reader = LogReader::new(parser, configuration.compilers);

    // The scanner fills the channel first, the writer drains it after; the
    // whole run is single threaded and the events stay in order.
    let (sender, receiver) = unbounded();
    let mut failed = false;
    for input in &arguments.inputs {
        if let Err(error) = reader.ingest(Path::new(input), &sender) {
            // A bad file aborts only that file, the remaining logs are
            // still scanned.
            eprintln!("{error}");
            failed = true;
        }
    }
    drop(sender);

    let consumer: Box<dyn Consumer> = match &arguments.output {
        args::Output::File(path) => Box::new(JsonEventWriter::create(Path::new(path))?),
        args::Output::Stdout => Box::new(JsonEventWriter::stdout()),
    };
    consumer.consume(receiver)?;

    let code = if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };
    Ok(code)
}
