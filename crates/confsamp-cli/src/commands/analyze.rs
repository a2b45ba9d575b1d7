use crate::cli::AnalyzeArgs;
use crate::config::PartialSearchConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use confsamp::analysis::summary::SummaryTable;
use confsamp::engine::progress::ProgressReporter;
use confsamp::workflows::analyze;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let partial_config = PartialSearchConfig::from_file(&args.config)?;
    let analysis_config = partial_config.build_analysis(args.temperature)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Analyzing converged strings under {:?} at {} K.",
        &args.scratch, analysis_config.temperature
    );
    let report = analyze::run(&args.scratch, &analysis_config, &reporter)?;

    if !report.failures.is_empty() {
        println!("Skipped {} unreadable string(s):", report.failures.len());
        for (index, message) in &report.failures {
            println!("  ✗ conformer {}: {}", index, message);
        }
    }

    if report.table.is_empty() {
        println!(
            "No converged strings found under '{}'.",
            args.scratch.display()
        );
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_summary_table(&mut out, &report.table)?;

    match report.stereo_gap {
        Some(gap) => println!(
            "\nΔG(S - R) over TS ensembles at {:.2} K: {:+.4} kcal/mol",
            analysis_config.temperature, gap
        ),
        None => println!(
            "\nOnly one product stereochemistry observed; no ensemble free-energy gap."
        ),
    }

    if let Some(output) = &args.output {
        let file = std::fs::File::create(output)?;
        report.table.write_csv(file)?;
        println!("✓ Summary written to: {}", output.display());
    }

    Ok(())
}

fn print_summary_table(out: &mut impl Write, table: &SummaryTable) -> io::Result<()> {
    writeln!(
        out,
        "{:>5} {:>10} {:>10} {:>9} {:>9} {:>9} {:>9} {:>6} {:>6} {:>6}",
        "conf", "Ea", "rel. TS", "forming", "formed", "facial", "face", "appr", "orient", "stereo"
    )?;
    writeln!(out, "{}", "-".repeat(90))?;
    for row in table.rows() {
        writeln!(
            out,
            "{:>5} {:>10.3} {:>10.3} {:>9.2} {:>9.2} {:>9.2} {:>9} {:>6} {:>6} {:>6}",
            row.conformer_index,
            row.activation_energy,
            row.relative_ts_energy,
            row.forming_bond_torsion,
            row.formed_bond_torsion,
            row.facial_torsion,
            row.facial.to_string(),
            row.approach.to_string(),
            row.orientation.to_string(),
            row.product_stereo.to_string(),
        )?;
    }
    Ok(())
}
