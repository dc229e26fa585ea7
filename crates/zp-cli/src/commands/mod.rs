pub mod check;
pub mod config;
pub mod watch;

use colored::Colorize;
use zp_downloads::{DownloadTable, ValidationReport};

/// Print the validation summary line, coloured by outcome
pub(crate) fn print_summary(report: &ValidationReport) {
    let line = report.to_string();
    if report.removed() == 0 && report.unsuccessful == 0 {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow());
    }
}

/// Print every file in the download table, one per line
pub(crate) fn print_table(table: &DownloadTable) {
    for (category, path) in table.iter() {
        println!("  {:<9} {}", category.to_string().cyan(), path);
    }
}
