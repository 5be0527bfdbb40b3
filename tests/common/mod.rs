#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Render rows of numbers as CSV with the given header.
pub fn csv_text(header: &[&str], rows: &[Vec<f64>]) -> String {
    let mut text = header.join(",");
    text.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

/// A small dielectron-shaped CSV with one missing cell, one duplicated row
/// and a far outlier in `pt1`.
pub fn dielectron_csv(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "dielectron.csv",
        "Run,Event,E1,pt1,pt2,phi1,Q1,M\n\
         147115,1,58.7,9.8,3.1,-0.4,-1,11.5\n\
         147115,2,6.6,5.2,4.0,2.8,1,9.3\n\
         147115,3,25.1,,4.6,1.1,1,8.8\n\
         147115,4,65.4,7.1,5.2,-1.3,-1,12.0\n\
         147115,2,6.6,5.2,4.0,2.8,1,9.3\n\
         147115,5,17.3,6.4,3.9,0.2,1,10.1\n\
         147115,6,44.0,8.3,4.4,-2.9,-1,10.7\n\
         147115,7,912.0,240.0,4.1,0.6,1,95.0\n",
    )
}
