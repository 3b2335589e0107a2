use clap::{ArgAction, Parser};
use ots_sbom::application::dto::OutputFormat;
use ots_sbom::resolution::services::MatchMode;
use std::path::PathBuf;

/// Enrich a Syft SBOM with registry metadata and dependency parents
#[derive(Parser, Debug)]
#[command(name = "ots-sbom")]
#[command(version)]
#[command(
    about = "Enrich a Syft SBOM with registry metadata and dependency parents",
    long_about = None
)]
pub struct Args {
    /// Syft JSON SBOM (syft -o json)
    #[arg(value_name = "SBOM")]
    pub sbom: PathBuf,

    /// Output format: yaml or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Concurrent registry lookups (1-64)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub workers: Option<u16>,

    /// Time limit in seconds for one package lookup
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Leave out packages with more parents than N
    #[arg(long, value_name = "N", conflicts_with = "no_parent_limit")]
    pub max_parents: Option<usize>,

    /// Keep packages regardless of their parent count
    #[arg(long)]
    pub no_parent_limit: bool,

    /// Exclude packages matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "@angular/*" -e "tslib"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// How declared dependency names are matched: substring or exact
    #[arg(long)]
    pub match_mode: Option<MatchMode>,

    /// Skip parent reconstruction (no dependency manifests are fetched)
    #[arg(long)]
    pub no_parents: bool,

    /// Path to config file (default: ./ots-sbom.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GitHub token for Go module lookups
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Validate the SBOM and configuration without contacting any registry
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let args = Args::try_parse_from(["ots-sbom", "sbom.json"]).unwrap();
        assert_eq!(args.sbom, PathBuf::from("sbom.json"));
        assert!(args.format.is_none());
        assert!(args.exclude.is_empty());
        assert!(!args.no_parents);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "ots-sbom",
            "sbom.json",
            "-f",
            "json",
            "-o",
            "out.json",
            "-w",
            "4",
            "--timeout",
            "15",
            "--max-parents",
            "5",
            "-e",
            "@angular/*",
            "-e",
            "tslib",
            "--match-mode",
            "exact",
            "--no-parents",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.timeout, Some(15));
        assert_eq!(args.max_parents, Some(5));
        assert_eq!(args.exclude, vec!["@angular/*", "tslib"]);
        assert_eq!(args.match_mode, Some(MatchMode::Exact));
        assert!(args.no_parents);
        assert!(args.dry_run);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_parent_limit_flags_conflict() {
        let result =
            Args::try_parse_from(["ots-sbom", "sbom.json", "--max-parents", "2", "--no-parent-limit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_workers_out_of_range() {
        assert!(Args::try_parse_from(["ots-sbom", "sbom.json", "-w", "0"]).is_err());
        assert!(Args::try_parse_from(["ots-sbom", "sbom.json", "-w", "65"]).is_err());
    }

    #[test]
    fn test_invalid_format() {
        assert!(Args::try_parse_from(["ots-sbom", "sbom.json", "-f", "markdown"]).is_err());
    }

    #[test]
    fn test_sbom_is_required() {
        assert!(Args::try_parse_from(["ots-sbom"]).is_err());
    }
}
