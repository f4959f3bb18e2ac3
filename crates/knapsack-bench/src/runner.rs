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

//! The batch loop.
//!
//! Every instance of every configured subset is loaded, solved with the
//! chosen algorithm and written as one CSV row. A failure on one instance is
//! logged and counted; it never stops the batch.

use crate::{
    cli::Algorithm,
    config::BenchConfig,
    dataset::{DatasetEntry, Subset},
    report::{CsvReport, ResultRecord, results_file_name},
};
use anyhow::{Context, anyhow};
use knapsack_bnb::solve::{SolveOptions, solve_instance};
use knapsack_heuristics::{
    KnapsackHeuristic,
    fptas::{Fptas, FptasError},
    greedy::GreedyTwoApprox,
};
use knapsack_model::{
    loading::{InstanceLoader, read_optimum},
    model::Instance,
    solution::Solution,
};
use std::{
    fs::File,
    io::BufWriter,
    path::Path,
    time::{Duration, Instant},
};

/// A configured solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solver {
    Bnb(SolveOptions),
    Greedy(GreedyTwoApprox),
    Fptas(Fptas),
}

/// What a solver returned for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverRun {
    pub profit: f64,
    pub selected_items: Vec<usize>,
    pub elapsed: Duration,
    pub exhaustive: Option<bool>,
}

impl SolverRun {
    fn from_heuristic(solution: Solution<f64>, elapsed: Duration) -> Self {
        Self {
            profit: solution.profit(),
            selected_items: solution.selected_indices().iter().map(|i| i.get()).collect(),
            elapsed,
            exhaustive: None,
        }
    }
}

impl Solver {
    /// Builds the solver for `algorithm` from the configured parameters.
    pub fn from_config(algorithm: Algorithm, config: &BenchConfig) -> Result<Self, FptasError> {
        Ok(match algorithm {
            Algorithm::Bnb => Solver::Bnb(
                SolveOptions::default()
                    .with_time_limit(config.time_limit())
                    .with_clock_check_interval(config.clock_check_interval),
            ),
            Algorithm::Greedy => Solver::Greedy(GreedyTwoApprox::new()),
            Algorithm::Fptas => Solver::Fptas(Fptas::new(config.fptas_epsilon)?),
        })
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Solver::Bnb(_) => Algorithm::Bnb,
            Solver::Greedy(_) => Algorithm::Greedy,
            Solver::Fptas(_) => Algorithm::Fptas,
        }
    }

    /// Solves `instance`.
    pub fn run(&self, instance: &Instance<f64>) -> anyhow::Result<SolverRun> {
        match self {
            Solver::Bnb(options) => {
                let report = solve_instance(instance, *options);
                Ok(SolverRun {
                    profit: report.profit,
                    selected_items: report.selected_indices.iter().map(|i| i.get()).collect(),
                    elapsed: report.elapsed,
                    exhaustive: Some(report.exhaustive),
                })
            }
            Solver::Greedy(greedy) => {
                let start = Instant::now();
                let Ok(solution) = greedy.solve(instance);
                Ok(SolverRun::from_heuristic(solution, start.elapsed()))
            }
            Solver::Fptas(fptas) => {
                let start = Instant::now();
                let solution = fptas.solve(instance)?;
                Ok(SolverRun::from_heuristic(solution, start.elapsed()))
            }
        }
    }
}

/// Counters over a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Instances with a result row.
    pub solved: usize,
    /// Instances that were skipped.
    pub failed: usize,
    /// Solved instances whose profit equals the known optimum.
    pub matched_optimum: usize,
    /// Solved instances where the search hit its time budget.
    pub time_limited: usize,
    /// Subsets that could not be processed at all.
    pub subsets_failed: usize,
}

impl BatchSummary {
    fn absorb(&mut self, other: BatchSummary) {
        self.solved += other.solved;
        self.failed += other.failed;
        self.matched_optimum += other.matched_optimum;
        self.time_limited += other.time_limited;
        self.subsets_failed += other.subsets_failed;
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} solved ({} at the known optimum, {} time-limited), {} failed, {} subsets skipped",
            self.solved, self.matched_optimum, self.time_limited, self.failed, self.subsets_failed
        )
    }
}

/// Loads, solves and checks a single dataset entry.
pub fn run_entry(solver: &Solver, entry: &DatasetEntry) -> anyhow::Result<ResultRecord> {
    let instance_path = entry
        .instance_path
        .as_deref()
        .ok_or_else(|| anyhow!("missing instance file for {}", entry.name))?;
    let optimum_path = entry
        .optimum_path
        .as_deref()
        .ok_or_else(|| anyhow!("missing optimum file for {}", entry.name))?;

    log::info!("Processing instance: {}", entry.name);

    let loaded = InstanceLoader::<f64>::new()
        .from_path(instance_path)
        .with_context(|| format!("failed to load {}", instance_path.display()))?;
    if !loaded.is_clean() {
        log::warn!(
            "{}: {} line(s) skipped or inconsistent, solving {} of {} declared items",
            entry.name,
            loaded.diagnostics.len(),
            loaded.instance.num_items(),
            loaded.declared_items
        );
    }
    let optimum: f64 = read_optimum(optimum_path)
        .with_context(|| format!("failed to read optimum {}", optimum_path.display()))?;

    let run = solver
        .run(&loaded.instance)
        .with_context(|| format!("{} failed on {}", solver.algorithm(), entry.name))?;

    let record = ResultRecord {
        instance: entry.name.clone(),
        optimal_profit: optimum,
        computed_profit: run.profit,
        selected_items: run.selected_items,
        time_taken: run.elapsed,
        exhaustive: run.exhaustive,
    };

    log::info!(
        "{}: profit {} (optimum {}) in {:.2?}",
        record.instance,
        record.computed_profit,
        record.optimal_profit,
        record.time_taken
    );
    if record.exhaustive == Some(false) {
        log::warn!("{}: time limit reached, result may be suboptimal", record.instance);
    }
    if record.computed_profit > record.optimal_profit && !record.matches_optimum() {
        log::warn!(
            "{}: computed profit {} exceeds the recorded optimum {}",
            record.instance,
            record.computed_profit,
            record.optimal_profit
        );
    }
    Ok(record)
}

/// Runs every entry of `subset` and writes the result file into
/// `results_dir`.
pub fn run_subset(
    solver: &Solver,
    subset: &Subset,
    results_dir: &Path,
) -> anyhow::Result<BatchSummary> {
    let entries = subset
        .discover()
        .with_context(|| format!("failed to list {}", subset.instances_dir().display()))?;

    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("failed to create {}", results_dir.display()))?;
    let path = results_dir.join(results_file_name(solver.algorithm().name(), subset.name()));
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut report = CsvReport::new(BufWriter::new(file))?;

    log::info!(
        "Running {} on subset {} ({} entries)",
        solver.algorithm(),
        subset.name(),
        entries.len()
    );

    let mut summary = BatchSummary::default();
    for entry in &entries {
        match run_entry(solver, entry) {
            Ok(record) => {
                report
                    .write_record(&record)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                summary.solved += 1;
                if record.matches_optimum() {
                    summary.matched_optimum += 1;
                }
                if record.exhaustive == Some(false) {
                    summary.time_limited += 1;
                }
            }
            Err(e) => {
                log::error!("Skipping {}: {:#}", entry.name, e);
                summary.failed += 1;
            }
        }
    }

    log::info!("Subset {}: {}", subset.name(), summary);
    Ok(summary)
}

/// Runs `algorithm` on every configured subset.
///
/// Only an invalid solver configuration is an error; everything below that
/// is logged and counted.
pub fn run_batch(config: &BenchConfig, algorithm: Algorithm) -> anyhow::Result<BatchSummary> {
    let solver = Solver::from_config(algorithm, config)?;

    let mut summary = BatchSummary::default();
    for name in &config.subsets {
        let subset = Subset::from_config(config, name);
        match run_subset(&solver, &subset, &config.results_dir) {
            Ok(s) => summary.absorb(s),
            Err(e) => {
                log::error!("Skipping subset {}: {:#}", name, e);
                summary.subsets_failed += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CSV_HEADER;
    use std::fs;

    const EXAMPLE: &str = "3 50\n60 10\n100 20\n120 30\n";
    const TIGHT: &str = "3 50\n60 20\n75 30\n110 50\n";

    /// Lays out a dataset with one subset `small` under `root`.
    fn config_in(root: &Path) -> BenchConfig {
        let data = root.join("data");
        fs::create_dir_all(data.join("small")).unwrap();
        fs::create_dir_all(data.join("small-optimum")).unwrap();

        fs::write(data.join("small").join("example"), EXAMPLE).unwrap();
        fs::write(data.join("small-optimum").join("example"), "220\n").unwrap();
        fs::write(data.join("small").join("tight"), TIGHT).unwrap();
        fs::write(data.join("small-optimum").join("tight"), "135\n").unwrap();

        let json = serde_json::json!({
            "log_dir": root.join("logs"),
            "dataset_dir": &data,
            "optimal_dataset_dir": &data,
            "results_dir": root.join("results"),
            "subsets": ["small"],
            "time_limit_seconds": 10.0,
        });
        serde_json::from_value(json).unwrap()
    }

    fn read_rows(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_solver_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());

        let bnb = Solver::from_config(Algorithm::Bnb, &config).unwrap();
        assert_eq!(bnb.algorithm(), Algorithm::Bnb);
        match bnb {
            Solver::Bnb(options) => {
                assert_eq!(options.time_limit(), Duration::from_secs(10));
                assert_eq!(options.clock_check_interval(), 4096);
            }
            other => panic!("expected branch-and-bound, got {:?}", other),
        }

        config.fptas_epsilon = 0.0;
        assert!(Solver::from_config(Algorithm::Fptas, &config).is_err());
        assert!(Solver::from_config(Algorithm::Greedy, &config).is_ok());
    }

    #[test]
    fn test_bnb_batch_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let summary = run_batch(&config, Algorithm::Bnb).unwrap();
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.matched_optimum, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.time_limited, 0);

        let rows = read_rows(&config.results_dir.join("bnb_results_small.csv"));
        assert_eq!(rows[0], CSV_HEADER);
        assert!(rows[1].starts_with("example;220;220;[1, 2];"));
        assert!(rows[1].ends_with(";true"));
        assert!(rows[2].starts_with("tight;135;135;[0, 1];"));
    }

    #[test]
    fn test_heuristic_rows_leave_exhaustive_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let summary = run_batch(&config, Algorithm::Greedy).unwrap();
        assert_eq!(summary.solved, 2);

        let rows = read_rows(&config.results_dir.join("greedy_results_small.csv"));
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("example;220;160;[0, 1];"));
        assert!(rows[1].ends_with(';'));
    }

    #[test]
    fn test_fptas_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.fptas_epsilon = 0.1;

        let summary = run_batch(&config, Algorithm::Fptas).unwrap();
        assert_eq!(summary.solved, 2);
        assert!(config.results_dir.join("fptas_results_small.csv").is_file());
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        let data = &config.dataset_dir;

        // no optimum
        fs::write(data.join("small").join("orphan"), EXAMPLE).unwrap();
        // unreadable header
        fs::write(data.join("small").join("broken"), "not a header\n").unwrap();
        fs::write(data.join("small-optimum").join("broken"), "1\n").unwrap();
        // subset without any directory
        config.subsets.push("absent".to_owned());

        let summary = run_batch(&config, Algorithm::Bnb).unwrap();
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.subsets_failed, 1);

        let rows = read_rows(&config.results_dir.join("bnb_results_small.csv"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_zero_budget_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.time_limit_seconds = 0.0;

        let summary = run_batch(&config, Algorithm::Bnb).unwrap();
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.time_limited, 2);

        let rows = read_rows(&config.results_dir.join("bnb_results_small.csv"));
        // greedy warm start on the first example picks items 0 and 1
        assert!(rows[1].starts_with("example;220;160;[0, 1];"));
        assert!(rows[1].ends_with(";false"));
    }

    #[test]
    fn test_missing_entry_files() {
        let solver = Solver::Greedy(GreedyTwoApprox::new());
        let entry = DatasetEntry {
            name: "ghost".to_owned(),
            instance_path: None,
            optimum_path: None,
        };
        let err = run_entry(&solver, &entry).unwrap_err();
        assert!(err.to_string().contains("missing instance file"));
    }
}
