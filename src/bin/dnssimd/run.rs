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

//! Implements the commands.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, error, info};

use dnssim::request::{self, Request, RequestError, Response};
use dnssim::resolve::Answer;
use dnssim::rr::{Qtype, RecordType};
use dnssim::zone::ZoneStore;
use dnssim::Outcome;

use crate::args::{Args, Command, ResolveArgs, ServeArgs};
use crate::config::{self, OutputFormat};
use crate::zones;

/// Runs the command given on the command line.
pub fn run(args: Args) {
    env_logger::init_from_env(Env::new().default_filter_or("warn"));

    let result = match args.command {
        Command::Resolve(resolve_args) => resolve(resolve_args),
        Command::Serve(serve_args) => serve(serve_args),
        Command::Zones => list_zones(),
    };
    if let Err(e) = result {
        let mut message = String::from("Failed to run:");
        for (i, cause) in e.chain().enumerate() {
            let _ = write!(message, "\n[{}] {}", i + 1, cause);
        }
        message.push_str("\nExiting with failure.");
        error!("{}", message);
        process::exit(1);
    }
}

////////////////////////////////////////////////////////////////////////
// RESOLVE                                                            //
////////////////////////////////////////////////////////////////////////

fn resolve(args: ResolveArgs) -> Result<()> {
    let config =
        config::load(args.config.as_deref()).context("failed to load the configuration")?;
    let store = zones::load().context("failed to load the zone store")?;

    let qtype = match args.rr_type {
        Some(ref text) => Qtype::from(text.as_str()),
        None => Qtype::Known(config.default_type.0),
    };
    let outcome = dnssim::simulate(&store, &args.domain, &qtype);
    if outcome.record.is_some() {
        delay(config.delay_ms);
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.format
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Json => {
            let json = Response::from(outcome)
                .to_json()
                .context("failed to serialize the outcome")?;
            writeln!(out, "{}", json)
        }
        OutputFormat::Text => write_text(&mut out, &outcome),
    };
    written.context("failed to write the outcome")
}

/// Writes `outcome` in human-readable form.
fn write_text(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    for (i, step) in outcome.steps.iter().enumerate() {
        writeln!(out, "{}. [{}] {}", i + 1, step.stage, step.description)?;
    }
    match (&outcome.record, &outcome.error) {
        (Some(Answer::Record(record)), _) => writeln!(out, "\n{}", record),
        (Some(Answer::Records(records)), _) => {
            writeln!(out)?;
            for record in records.iter() {
                writeln!(out, "{}", record)?;
            }
            Ok(())
        }
        (None, Some(error)) => writeln!(out, "\nError: {} ({})", error, error.kind()),
        (None, None) => Ok(()),
    }
}

////////////////////////////////////////////////////////////////////////
// SERVE                                                              //
////////////////////////////////////////////////////////////////////////

fn serve(args: ServeArgs) -> Result<()> {
    let config =
        config::load(args.config.as_deref()).context("failed to load the configuration")?;
    let store = zones::load().context("failed to load the zone store")?;
    let delay_ms = args.delay.unwrap_or(config.delay_ms);
    let default_type = config.default_type.0;

    info!("Answering requests from standard input.");
    let stdin = io::stdin();
    let stdout = io::stdout();
    answer_requests(
        &store,
        stdin.lock(),
        &mut stdout.lock(),
        default_type,
        delay_ms,
    )?;
    info!("Reached the end of the input.");
    Ok(())
}

/// Answers the requests in `input`, one per line, writing one response
/// line per request to `out`. A line that cannot be understood gets an
/// error response; only I/O failures stop the loop.
fn answer_requests(
    store: &ZoneStore,
    input: impl BufRead,
    out: &mut impl Write,
    default_type: RecordType,
    delay_ms: u64,
) -> Result<()> {
    for line in input.split(b'\n') {
        let mut line = line.context("failed to read a request")?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let result = String::from_utf8(line)
            .map_err(|e| RequestError::Malformed(e.to_string()))
            .and_then(|line| Request::from_json(&line))
            .and_then(|r| request::handle(store, &r, default_type));
        let json = match result {
            Ok(outcome) => {
                let response = Response::from(outcome);
                if response.is_success() {
                    delay(delay_ms);
                }
                response.to_json()
            }
            Err(e) => {
                debug!("Rejected a request: {}.", e);
                e.to_json()
            }
        }
        .context("failed to serialize a response")?;
        writeln!(out, "{}", json).context("failed to write a response")?;
        out.flush().context("failed to write a response")?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////
// ZONES                                                              //
////////////////////////////////////////////////////////////////////////

fn list_zones() -> Result<()> {
    let store = zones::load().context("failed to load the zone store")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    zones::list(&store, &mut out).context("failed to write the listing")
}

/// Sleeps for `ms` milliseconds, simulating network latency.
fn delay(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_output_works() {
        let store = ZoneStore::seed();
        let outcome = dnssim::simulate(&store, "example.com", &Qtype::from("MX"));
        let mut out = Vec::new();
        write_text(&mut out, &outcome).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1. [client-to-resolver] Query for example.com (MX record)\n"));
        assert!(text.ends_with("MX 3600 10 mail.example.com\nMX 3600 20 backup-mail.example.com\n"));

        let outcome = dnssim::simulate(&store, "nonexistent.com", &Qtype::from("A"));
        let mut out = Vec::new();
        write_text(&mut out, &outcome).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\nError: Domain not found (DOMAIN_NOT_FOUND)\n"));
    }

    #[test]
    fn undecodable_lines_get_error_responses() {
        let store = ZoneStore::seed();
        let input: &[u8] = b"\xff\xfe\n{\"domain\":\"example.com\"}\n";
        let mut out = Vec::new();
        answer_requests(&store, input, &mut out, RecordType::A, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let rejected: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(rejected["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request: "));

        let answered: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(answered["steps"].as_array().unwrap().len(), 8);
        assert_eq!(answered["record"]["value"], "93.184.216.34");
        assert!(answered["error"].is_null());
    }

    #[test]
    fn blank_and_crlf_lines_are_handled() {
        let store = ZoneStore::seed();
        let input: &[u8] = b"\n  \r\n{\"domain\":\"nonexistent.com\"}\r\n{}";
        let mut out = Vec::new();
        answer_requests(&store, input, &mut out, RecordType::A, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"error_kind\":\"DOMAIN_NOT_FOUND\""), "{}", lines[0]);
        assert_eq!(lines[1], "{\"error\":\"Domain is required\"}");
    }
}
