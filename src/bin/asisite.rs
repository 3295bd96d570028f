use anyhow::Result;
use asisite::{
    self,
    cli::{Cli, Commands},
    io::{bed, json},
    region::ContigPolicy,
};
use clap::Parser;
use env_logger::{Builder, Env};
use log::{info, warn};

fn main() -> Result<()> {
    // Initialize the logger. If the log level is not set via `RUST_LOG`, set it to 'info' by default
    Builder::from_env(Env::default().default_filter_or("info")).init();

    // parse command line and validate inputs where possible
    let config = Cli::parse();

    match &config.command {
        Commands::Filter {
            input,
            output,
            mapq_threshold,
            column,
        } => {
            asisite::run_filter(input, output, *mapq_threshold, *column)?;
        }
        Commands::Intersect {
            sample_bed,
            asisi_bed,
            total_count,
            output,
            ignore_contig: _,
            index_sites,
        } => {
            let policy = config.command.contig_policy();
            if policy == ContigPolicy::IgnoreContig {
                warn!("Ignoring contigs: intervals are matched to sites on coordinates alone");
            }
            info!("Intersecting {sample_bed} with AsiSI sites in {asisi_bed}");
            let rates = asisite::run(sample_bed, asisi_bed, *total_count, policy, *index_sites)?;
            // only written once every site rate has been computed
            bed::write_site_rates_to_path(output, &rates)?;
        }
        Commands::Combine {
            output, summary, ..
        } => {
            let inputs = config.command.get_sample_ids()?;
            let (rows, stats) = asisite::run_combine(&inputs)?;
            asisite::utils::write_atomically(output, |file| bed::write_combined(file, &rows))?;
            info!("Wrote {} rows to {output}", rows.len());
            if let Some(summary_path) = summary {
                json::write_summary_to_path(summary_path, &stats)?;
            }
        }
    }

    Ok(())
}
