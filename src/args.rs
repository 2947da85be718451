// SPDX-License-Identifier: GPL-3.0-or-later

//! This module contains the command line interface of the application.
//!
//! The command line parsing is implemented using the `clap` library.
//! The module defines types to represent a structured form of the program
//! invocation.

use anyhow::anyhow;
use clap::{arg, command, ArgAction, ArgMatches, Command};

const DEFAULT_OUTPUT_FILE: &str = "events.json";
/// Writing to this name means writing to standard output.
const STDOUT_OUTPUT_FILE: &str = "-";

/// Represents the command line arguments of the application.
#[derive(Debug, PartialEq)]
pub struct Arguments {
    // The path of the configuration file.
    pub config: Option<String>,
    // The build log files to scan, in order.
    pub inputs: Vec<String>,
    // Where the extraction events are written.
    pub output: Output,
}

/// Represents the output target of the extraction events.
#[derive(Debug, PartialEq)]
pub enum Output {
    File(String),
    Stdout,
}

impl TryFrom<ArgMatches> for Arguments {
    type Error = anyhow::Error;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let config = matches.get_one::<String>("config").map(String::to_string);

        let inputs: Vec<String> = matches
            .get_many::<String>("LOG_FILE")
            .ok_or_else(|| anyhow!("missing build log file"))?
            .cloned()
            .collect();

        let output = matches
            .get_one::<String>("output")
            .map(String::to_string)
            .expect("output is defaulted");
        let output = if output == STDOUT_OUTPUT_FILE {
            Output::Stdout
        } else {
            Output::File(output)
        };

        Ok(Arguments {
            config,
            inputs,
            output,
        })
    }
}

/// Represents the command line interface of the application.
///
/// The application takes one or more build log files and writes the
/// extracted compiler invocations as a JSON event array.
pub fn cli() -> Command {
    command!()
        .arg_required_else_help(true)
        .args(&[
            arg!(<LOG_FILE> "Build log files to scan")
                .action(ArgAction::Append)
                .num_args(1..)
                .required(true),
            arg!(-o --output <FILE> "Path of the event file (\"-\" for stdout)")
                .default_value(DEFAULT_OUTPUT_FILE)
                .hide_default_value(false),
            arg!(-c --config <FILE> "Path of the config file"),
        ])
}
