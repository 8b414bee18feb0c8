//! Benchmark harness CLI
//!
//! One positional argument: the zero-based index of the backend to run.
//! A malformed invocation is the only error handled gracefully; anything
//! else surfaces unmodified so the underlying cause stays visible.

use clap::Parser;
use clap::error::ErrorKind;
use extract_bench::{BackendRegistry, BenchConfig, Result, Runner, builtin_registry};

#[derive(Parser)]
#[command(name = "extract-bench")]
#[command(about = "Benchmark one document text-extraction backend", long_about = None)]
struct Cli {
    /// Zero-based index of the backend to benchmark
    index: usize,
}

fn usage(registry: &BackendRegistry) -> String {
    format!(
        "usage: extract-bench <index> (with index = value between 0 and {})",
        registry.len().saturating_sub(1)
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = BenchConfig::from_env();
    config.validate()?;

    let registry = builtin_registry();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(_) => {
            eprintln!("{}", usage(&registry));
            std::process::exit(1);
        }
    };

    let runner = Runner::new(config, registry);
    let report = runner.run(cli.index).await?;
    report.print()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_bench::BackendSpec;

    #[test]
    fn test_usage_names_the_valid_bounds() {
        let usage = usage(&builtin_registry());
        assert_eq!(usage, "usage: extract-bench <index> (with index = value between 0 and 1)");
    }

    #[test]
    fn test_cli_requires_exactly_one_index() {
        assert!(Cli::try_parse_from(["extract-bench"]).is_err());
        assert!(Cli::try_parse_from(["extract-bench", "0", "1"]).is_err());
        assert!(Cli::try_parse_from(["extract-bench", "not-a-number"]).is_err());

        let cli = Cli::try_parse_from(["extract-bench", "1"]).unwrap();
        assert_eq!(cli.index, 1);
    }

    #[test]
    fn test_cli_misuse_constructs_no_backend() {
        let mut registry = BackendRegistry::new();
        registry.register(BackendSpec::new("untouched", |_| {
            panic!("backend must not be constructed on a malformed invocation")
        }));

        for args in [&["extract-bench"][..], &["extract-bench", "0", "1"]] {
            assert!(Cli::try_parse_from(args).is_err());
            // The recovery path only formats the usage line; the factory
            // above panics if a backend is ever built.
            assert_eq!(
                usage(&registry),
                "usage: extract-bench <index> (with index = value between 0 and 0)"
            );
        }
    }
}
