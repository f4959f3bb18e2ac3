// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use anyhow::Context;
use clap::Parser;
use knapsack_bench::{cli::Args, config::BenchConfig, logger, runner};
use std::time::Instant;

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let config = BenchConfig::from_path(&args.config)
        .with_context(|| format!("failed to load configuration {}", args.config.display()))?
        .with_overrides(&args)
        .context("invalid command line override")?;

    let log_path = logger::init(&config.log_dir)
        .with_context(|| format!("failed to set up logging in {}", config.log_dir.display()))?;
    log::info!("Log file created at: {}", log_path.display());
    log::debug!("Configuration: {:?}", config);

    let start = Instant::now();
    let summary = runner::run_batch(&config, args.algorithm)?;
    log::info!(
        "Finished {} in {:.2?}: {}",
        args.algorithm,
        start.elapsed(),
        summary
    );
    log::logger().flush();
    Ok(())
}
