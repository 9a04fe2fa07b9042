// Copyright 2022 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implements command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parses the command line arguments.
pub fn parse() -> Args {
    Args::parse()
}

/// A simulator of hierarchical DNS resolution
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate the resolution of a single domain name
    Resolve(ResolveArgs),

    /// Answer JSON requests, one per line, from standard input
    Serve(ServeArgs),

    /// List the simulated zones and any problems with them
    Zones,
}

#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// The domain name to resolve
    #[clap(value_name = "DOMAIN")]
    pub domain: String,

    /// Set the record type to ask for
    #[clap(long = "type", short = 't', value_name = "TYPE")]
    pub rr_type: Option<String>,

    /// Print the outcome as JSON
    #[clap(long)]
    pub json: bool,

    /// Set the configuration file to use
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Set the configuration file to use
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the delay before each successful response, in milliseconds
    #[clap(long, value_name = "MS")]
    pub delay: Option<u64>,
}
