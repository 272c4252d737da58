//! catalogen binary
//!
//! Thin adapter: parse arguments, install the tracing subscriber, run one
//! bootstrap invocation and persist its bundle. Partial failure is reported,
//! not fatal; only an unusable transport or an unwritable output directory
//! exits non-zero.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalogen::catalog::{BuildRequest, CatalogBootstrap};
use catalogen::cli::Cli;
use catalogen::http::ReqwestFetcher;
use catalogen::output;

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "catalogen=debug" } else { "catalogen=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fetcher = match ReqwestFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut bootstrap = CatalogBootstrap::new(cli.runtime, &fetcher, cli.verbose);
    for root in &cli.resource_roots {
        bootstrap.add_local_root(root);
    }

    let request = BuildRequest {
        catalog_version: cli.catalog_version,
        kamelets_version: cli.kamelets_version,
        crds_version: cli.crds_version,
    };

    let outcomes = bootstrap.run(&request);
    let bundle = bootstrap.into_bundle();

    if let Err(e) = output::write_bundle(&cli.output, &bundle, &outcomes) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("Catalog bundle written to {}", cli.output.display());
    for (step, ok) in [
        ("camel catalog", outcomes.catalog),
        ("yaml dsl schema", outcomes.yaml_dsl_schema),
        ("kubernetes schema", outcomes.kubernetes_schema),
        ("camel-k crds", outcomes.crds),
        ("kamelets", outcomes.kamelets),
        ("kamelet boundaries", outcomes.kamelet_boundaries),
        ("local schemas", outcomes.local_schemas),
        ("kaoto patterns", outcomes.kaoto_patterns),
    ] {
        println!("  {} {}", if ok { "ok  " } else { "skip" }, step);
    }
}
