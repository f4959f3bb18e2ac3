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

//! Pairing instance files with their known optima.
//!
//! A subset `s` lives in `<dataset_dir>/s`, its optima in
//! `<optimal_dataset_dir>/s-optimum`, one file per instance under the same
//! name.

use crate::config::BenchConfig;
use std::{
    collections::BTreeSet,
    io,
    path::{Path, PathBuf},
};

/// One instance name together with whatever files exist for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    /// The file name shared by the instance and its optimum.
    pub name: String,
    /// The instance file, if present.
    pub instance_path: Option<PathBuf>,
    /// The optimum file, if present.
    pub optimum_path: Option<PathBuf>,
}

impl DatasetEntry {
    /// Returns `true` if both files are present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.instance_path.is_some() && self.optimum_path.is_some()
    }
}

/// The two directories making up a dataset subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    name: String,
    instances_dir: PathBuf,
    optima_dir: PathBuf,
}

impl Subset {
    /// Creates the subset `name` from explicit directories.
    pub fn new<N, I, O>(name: N, instances_dir: I, optima_dir: O) -> Self
    where
        N: Into<String>,
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            instances_dir: instances_dir.into(),
            optima_dir: optima_dir.into(),
        }
    }

    /// Creates the subset `name` laid out as configured.
    pub fn from_config(config: &BenchConfig, name: &str) -> Self {
        Self::new(name, config.instances_dir(name), config.optima_dir(name))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn instances_dir(&self) -> &Path {
        &self.instances_dir
    }

    #[inline]
    pub fn optima_dir(&self) -> &Path {
        &self.optima_dir
    }

    /// Lists every name found in either directory, sorted.
    ///
    /// An unreadable instance directory is an error. A missing optimum
    /// directory is not: its instances are returned without optimum paths.
    pub fn discover(&self) -> io::Result<Vec<DatasetEntry>> {
        let instances = list_files(&self.instances_dir)?;
        let optima = match list_files(&self.optima_dir) {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "Optimum directory {} does not exist",
                    self.optima_dir.display()
                );
                BTreeSet::new()
            }
            Err(e) => return Err(e),
        };

        let entries = instances
            .union(&optima)
            .map(|name| DatasetEntry {
                name: name.clone(),
                instance_path: instances
                    .contains(name)
                    .then(|| self.instances_dir.join(name)),
                optimum_path: optima.contains(name).then(|| self.optima_dir.join(name)),
            })
            .collect();
        Ok(entries)
    }
}

/// Names of the regular files directly inside `dir`.
fn list_files(dir: &Path) -> io::Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(name) => log::warn!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    Ok(names)
}
