// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! astrocheck binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use astrocheck::capture::CaptureLog;
use astrocheck::cli::Cli;
use astrocheck::exit_codes;
use astrocheck::output_diagnostic::{print_error, print_status, print_warning};
use astrocheck::report::BaselineSummary;
use astrocheck::{Orchestrator, ProcessRunner, Suite, SuiteReport};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(run(cli).await as u8)
}

async fn run(cli: Cli) -> i32 {
    if let Err(msg) = cli.validate() {
        print_error(msg);
        return exit_codes::SETUP_ERROR;
    }

    let suite = match load_suite(&cli) {
        Ok(suite) => suite,
        Err(msg) => {
            print_error(msg);
            return exit_codes::SETUP_ERROR;
        }
    };

    if cli.list {
        list_scenarios(&suite);
        return exit_codes::SUCCESS;
    }

    let executable = match cli.require_executable() {
        Ok(exe) => exe.to_path_buf(),
        Err(msg) => {
            print_error(msg);
            return exit_codes::SETUP_ERROR;
        }
    };

    let log = match cli.record {
        Some(ref path) => match CaptureLog::with_file(path) {
            Ok(log) => log,
            Err(e) => {
                print_error(format!(
                    "Failed to create record file '{}': {}",
                    path.display(),
                    e
                ));
                return exit_codes::SETUP_ERROR;
            }
        },
        None => CaptureLog::new(),
    };

    let runner = ProcessRunner::new(&executable).with_timeout(suite.timeout);
    let suite_name = suite.name.clone();
    let input = suite.input.clone();
    let orchestrator = Orchestrator::new(runner, suite)
        .with_log(log.clone())
        .with_work_root(cli.work_root.clone())
        .with_verbose(cli.verbose)
        .with_jobs(usize::from(cli.jobs));

    print_status(format!(
        "Running baseline for suite '{}' with {}",
        suite_name,
        executable.display()
    ));
    let baseline = match orchestrator.prepare_baseline().await {
        Ok(baseline) => Arc::new(baseline),
        Err(e) => {
            print_error(e);
            return exit_codes::SETUP_ERROR;
        }
    };

    let outcomes = orchestrator.run_suite(Arc::clone(&baseline)).await;
    let report = SuiteReport::new(
        suite_name,
        executable,
        input,
        BaselineSummary::from(baseline.as_ref()),
        outcomes,
    )
    .with_timestamp();

    println!("{}", report.summary());

    if let Err(e) = log.flush() {
        print_warning(format!("Invocation record is incomplete: {}", e));
    }

    if let Some(ref path) = cli.report {
        if let Err(e) = std::fs::write(path, report.to_markdown()) {
            print_warning(format!(
                "Failed to write report '{}': {}",
                path.display(),
                e
            ));
        }
    }

    report.exit_code()
}

fn load_suite(cli: &Cli) -> Result<Suite, String> {
    let suite = match cli.suite {
        Some(ref path) => Suite::load(path),
        None => Suite::builtin(),
    }
    .map_err(|e| e.to_string())?;

    let suite = match cli.input {
        Some(ref input) => suite.with_input(input.clone()),
        None => suite,
    };
    let suite = match cli.timeout_override() {
        Some(timeout) => suite.with_timeout(timeout),
        None => suite,
    };
    suite.select(&cli.scenarios).map_err(|e| e.to_string())
}

fn list_scenarios(suite: &Suite) {
    println!("{} ({})", suite.name, suite.input.display());
    for scenario in &suite.scenarios {
        let mut line = format!("  {:<20} {}", scenario.name, scenario.kind);
        if !scenario.args.is_empty() {
            line.push_str(&format!("  [{}]", scenario.args.join(" ")));
        }
        if let Some(count) = scenario.expected_file_count {
            line.push_str(&format!("  {} files", count));
        }
        println!("{}", line);
    }
}
