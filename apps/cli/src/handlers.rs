use anyhow::{Context, Result};
use fgate::domain::GateConfig;
use fgate::resolver::Feature;
use fgate::{Order, Outcome, resolve_manifest, validate};
use std::process::ExitCode;

/// Exit code reported when at least one feature failed to resolve.
const UNRESOLVED: u8 = 2;

pub fn resolve(manifest: &GateConfig, order: Order, json: bool) -> Result<ExitCode> {
    let report = resolve_manifest(manifest)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report.view(order)).context("rendering JSON report")?;
        println!("{rendered}");
    } else {
        let outcomes = report.outcomes(order);
        let width = outcomes.iter().map(|o| o.id.as_str().len()).max().unwrap_or(0);
        for outcome in &outcomes {
            print_outcome(outcome, width);
        }

        let resolved = outcomes.iter().filter(|o| o.is_resolved()).count();
        println!(
            "{resolved} resolved, {} failed in {} rounds",
            outcomes.len() - resolved,
            report.resolution().rounds()
        );
    }

    Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::from(UNRESOLVED) })
}

fn print_outcome(outcome: &Outcome<'_>, width: usize) {
    let id = outcome.id.as_str();
    match outcome.resolved_in {
        Some(round) => println!("{id:<width$}  resolved (round {round})"),
        None => {
            println!("{id:<width$}  failed");
            for failure in outcome.failures {
                println!("  - [{}] {}", failure.kind(), failure.reason());
            }
        },
    }
}

pub fn check(manifest: &GateConfig) -> Result<ExitCode> {
    validate(manifest)?;

    let active = manifest.features.iter().filter(|f| f.active).count();
    println!(
        "manifest ok: {} features ({active} active), {} flags",
        manifest.features.len(),
        manifest.flags.len()
    );
    Ok(ExitCode::SUCCESS)
}

pub fn explain(manifest: &GateConfig, feature: &str) -> Result<ExitCode> {
    let report = resolve_manifest(manifest)?;
    let explanation = report.explain(feature)?;

    print!("{explanation}");

    let plugin = explanation.plugin();
    let settled = plugin.is_active() || report.resolution().is_resolved(plugin.id().as_str());
    Ok(if settled { ExitCode::SUCCESS } else { ExitCode::from(UNRESOLVED) })
}
