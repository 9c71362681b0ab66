//! `ljpw scan`

use std::path::Path;

use serde::Serialize;

use ljpw_analysis::metrics::{match_archetype, ArchetypeMatch, SystemSummary};
use ljpw_analysis::scanner::{ScanEntry, ScanStats, Scanner};
use ljpw_core::config::CliOverrides;
use ljpw_core::LjpwError;

use super::{format_profile, load_config, print_json};

#[derive(Serialize)]
struct FileReport<'a> {
    #[serde(flatten)]
    entry: &'a ScanEntry,
    archetype: ArchetypeMatch,
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    root: &'a str,
    files: Vec<FileReport<'a>>,
    stats: &'a ScanStats,
    summary: SystemSummary,
    errors: &'a [String],
}

pub fn run(root: &Path, json: bool, max_file_size: Option<u64>, threads: Option<usize>) -> Result<(), LjpwError> {
    let config = load_config(
        root,
        CliOverrides {
            scan_max_file_size: max_file_size,
            scan_threads: threads,
            ..CliOverrides::default()
        },
    )?;
    let report = Scanner::from_config(&config)?.scan(root)?;
    let summary = report.summary();
    let files: Vec<FileReport<'_>> = report
        .entries
        .iter()
        .map(|entry| FileReport {
            entry,
            archetype: match_archetype(&entry.profile),
        })
        .collect();

    if json {
        return print_json(&ScanOutput {
            root: &report.root,
            files,
            stats: &report.stats,
            summary,
            errors: &report.errors,
        });
    }

    for file in &files {
        println!(
            "{:<48} {}  {} ({:.2})",
            file.entry.path,
            format_profile(file.entry.profile.as_array()),
            file.archetype.archetype,
            file.archetype.confidence
        );
    }
    println!();
    println!(
        "{} files, {} skipped, {} unreadable",
        report.stats.files_scanned, report.stats.files_skipped, report.stats.files_unreadable
    );
    println!("mean profile   {}", format_profile(summary.mean_profile.as_array()));
    println!("harmony        {:.4}", summary.harmony);
    println!("entropy        {:.4}", summary.entropy);
    println!("total mass     {:.2}", summary.total_mass);
    println!("mean density   {:.2}", summary.mean_density);
    if let Some(archetype) = summary.dominant_archetype {
        println!("dominant       {archetype}");
    }
    for centre in &summary.gravitational_centres {
        println!("centre         {} (mass {:.2})", centre.name, centre.mass);
    }
    for hotspot in &summary.friction_hotspots {
        println!("friction       {} <-> {} ({:.2})", hotspot.a, hotspot.b, hotspot.friction);
    }
    for cluster in &summary.resonance_clusters {
        println!("cluster        {}", cluster.join(", "));
    }
    for error in &report.errors {
        eprintln!("warning: {error}");
    }
    Ok(())
}
