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

//! Command line arguments of the batch runner.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The solver a batch run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Exact branch-and-bound with a time budget.
    Bnb,
    /// Greedy 2-approximation.
    Greedy,
    /// Profit-scaling FPTAS.
    Fptas,
}

impl Algorithm {
    /// The short name used in result file names.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bnb => "bnb",
            Algorithm::Greedy => "greedy",
            Algorithm::Fptas => "fptas",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON configuration file
    #[clap(short, long, default_value = "config.json")]
    pub config: PathBuf,
    /// The solver to run on every instance
    #[clap(short, long, value_enum, default_value_t = Algorithm::Bnb)]
    pub algorithm: Algorithm,
    /// Per-instance time budget in seconds (overrides the configuration)
    #[clap(short, long)]
    pub time_limit: Option<f64>,
    /// Approximation parameter of the FPTAS (overrides the configuration)
    #[clap(short, long)]
    pub epsilon: Option<f64>,
    /// Dataset subset to run, may be repeated (overrides the configuration)
    #[clap(short, long = "subset")]
    pub subsets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["knapsack-bench"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.algorithm, Algorithm::Bnb);
        assert!(args.time_limit.is_none());
        assert!(args.epsilon.is_none());
        assert!(args.subsets.is_empty());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "knapsack-bench",
            "--config",
            "bench.json",
            "--algorithm",
            "fptas",
            "--epsilon",
            "0.1",
            "--time-limit",
            "2.5",
            "--subset",
            "large_scale",
            "-s",
            "low-dimensional",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("bench.json"));
        assert_eq!(args.algorithm, Algorithm::Fptas);
        assert_eq!(args.epsilon, Some(0.1));
        assert_eq!(args.time_limit, Some(2.5));
        assert_eq!(args.subsets, vec!["large_scale", "low-dimensional"]);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Args::try_parse_from(["knapsack-bench", "-a", "simplex"]).is_err());
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::Bnb.to_string(), "bnb");
        assert_eq!(Algorithm::Greedy.name(), "greedy");
        assert_eq!(Algorithm::Fptas.name(), "fptas");
    }
}
