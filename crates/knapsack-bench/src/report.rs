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

//! Result CSV files.
//!
//! One `;`-delimited file per algorithm and subset, one row per solved
//! instance.

use std::{fmt::Write as _, io::Write, time::Duration};

/// The header row of every result file.
pub const CSV_HEADER: &str =
    "instance;optimal_profit;computed_profit;selected_items;time_taken;exhaustive";

/// Returns the result file name for `algorithm` on `subset`.
#[inline]
pub fn results_file_name(algorithm: &str, subset: &str) -> String {
    format!("{}_results_{}.csv", algorithm, subset)
}

/// One row of a result file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub instance: String,
    pub optimal_profit: f64,
    pub computed_profit: f64,
    /// Original positions of the selected items, ascending.
    pub selected_items: Vec<usize>,
    pub time_taken: Duration,
    /// `Some(true)` for a proven optimum, `Some(false)` for a time-cut
    /// search and `None` for heuristics.
    pub exhaustive: Option<bool>,
}

impl ResultRecord {
    /// Returns `true` if the computed profit matches the known optimum up to
    /// rounding.
    pub fn matches_optimum(&self) -> bool {
        let scale = self.optimal_profit.abs().max(1.0);
        (self.computed_profit - self.optimal_profit).abs() <= 1e-9 * scale
    }

    /// Renders the row without a line terminator.
    pub fn to_csv_row(&self) -> String {
        let mut items = String::from("[");
        for (i, index) in self.selected_items.iter().enumerate() {
            if i > 0 {
                items.push_str(", ");
            }
            let _ = write!(items, "{}", index);
        }
        items.push(']');

        let exhaustive = match self.exhaustive {
            Some(flag) => flag.to_string(),
            None => String::new(),
        };

        format!(
            "{};{};{};{};{:.6};{}",
            self.instance,
            self.optimal_profit,
            self.computed_profit,
            items,
            self.time_taken.as_secs_f64(),
            exhaustive
        )
    }
}

/// Writes result rows to any sink, starting with the header.
#[derive(Debug)]
pub struct CsvReport<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> CsvReport<W> {
    /// Writes the header and returns the report.
    pub fn new(mut writer: W) -> std::io::Result<Self> {
        writeln!(writer, "{}", CSV_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Appends one row and flushes it.
    pub fn write_record(&mut self, record: &ResultRecord) -> std::io::Result<()> {
        writeln!(self.writer, "{}", record.to_csv_row())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResultRecord {
        ResultRecord {
            instance: "f1_l-d_kp_10_269".to_owned(),
            optimal_profit: 295.0,
            computed_profit: 295.0,
            selected_items: vec![1, 2, 3, 4],
            time_taken: Duration::from_millis(1500),
            exhaustive: Some(true),
        }
    }

    #[test]
    fn test_results_file_name() {
        assert_eq!(
            results_file_name("bnb", "low-dimensional"),
            "bnb_results_low-dimensional.csv"
        );
    }

    #[test]
    fn test_row_format() {
        assert_eq!(
            record().to_csv_row(),
            "f1_l-d_kp_10_269;295;295;[1, 2, 3, 4];1.500000;true"
        );

        let heuristic = ResultRecord {
            selected_items: vec![],
            exhaustive: None,
            computed_profit: 250.5,
            ..record()
        };
        assert_eq!(
            heuristic.to_csv_row(),
            "f1_l-d_kp_10_269;295;250.5;[];1.500000;"
        );
    }

    #[test]
    fn test_matches_optimum() {
        assert!(record().matches_optimum());
        let worse = ResultRecord {
            computed_profit: 294.0,
            ..record()
        };
        assert!(!worse.matches_optimum());
    }

    #[test]
    fn test_report_writes_header_then_rows() {
        let mut report = CsvReport::new(Vec::new()).unwrap();
        report.write_record(&record()).unwrap();
        report.write_record(&record()).unwrap();
        assert_eq!(report.rows(), 2);

        let out = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], lines[2]);
    }
}
