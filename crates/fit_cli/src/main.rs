use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fit_core::{
    calculate_and_generate_output, FittingSummary, GameContent, SimulationOutput, StaticData,
    Usage,
};
use fit_data::{load_content, load_fit};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "fit_cli", about = "Ship fitting attribute calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a fitting and print its attributes and resource usage.
    Calc {
        /// Fitting JSON (a serialized `SimulationInput`).
        #[arg(long)]
        fit: String,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        /// Print the full calculation output as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Load the content directory and check its cross references.
    Validate {
        #[arg(long, default_value = "./content")]
        content_dir: String,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn calc(fit_path: &str, content_dir: &str, json: bool) -> Result<()> {
    let content = load_content(content_dir)?;
    let input = load_fit(fit_path)?;
    let output = calculate_and_generate_output(&input, &content);
    tracing::info!(
        ship = %input.ship.type_id,
        modules = output.modules.len(),
        drones = output.drones.len(),
        fighters = output.fighters.len(),
        "fit calculated"
    );

    if json {
        let text = serde_json::to_string_pretty(&output).context("serializing output")?;
        println!("{text}");
        return Ok(());
    }

    let summary = FittingSummary::compute(&input, &output, &content);
    print_fit(&output, &content);
    println!("{}", "-".repeat(60));
    print_summary(&summary);
    Ok(())
}

fn validate(content_dir: &str) -> Result<()> {
    let content = load_content(content_dir)?;
    tracing::info!(content_dir, "content validated");
    println!(
        "content_version={} types={} effects={} attributes={} mutations={}: ok",
        content.content_version,
        content.types().count(),
        content.effects().count(),
        content.attributes().count(),
        content.mutations().count(),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn attribute_name(content: &GameContent, id: fit_core::AttributeId) -> String {
    content
        .attribute(id)
        .map_or_else(|| id.to_string(), |def| def.name.clone())
}

fn print_item(label: &str, item: &fit_core::ItemOutput, content: &GameContent) {
    println!("{label}: {} ({})", item.name, item.type_id);
    for (id, value) in item.attributes.iter() {
        println!("    {:<32} {value:>14.4}", attribute_name(content, id));
    }
}

fn print_fit(output: &SimulationOutput, content: &GameContent) {
    print_item("ship", &output.ship.item, content);
    for module in &output.modules {
        print_item(
            &format!("{} [{:?}]", module.flag, module.status),
            &module.item,
            content,
        );
        if let Some(charge) = &module.charge {
            print_item(
                &format!("  charge x{}", module.charge_quantity),
                charge,
                content,
            );
        }
    }
    for drone in &output.drones {
        print_item(
            &format!("drone {}/{}", drone.active_count, drone.quantity),
            &drone.item,
            content,
        );
    }
    for fighter in &output.fighters {
        let tube = fighter
            .tube_id
            .map_or_else(|| "bay".to_string(), |tube| format!("tube {tube}"));
        print_item(&format!("fighter {tube}"), &fighter.item, content);
    }
    for implant in &output.implants {
        print_item("implant", implant, content);
    }
    for environment in &output.environment {
        print_item("environment", environment, content);
    }
}

fn print_usage(label: &str, usage: Usage) {
    let marker = if usage.is_exceeded() { "  EXCEEDED" } else { "" };
    println!(
        "{label:<20} {used:>10.2} / {total:>10.2}{marker}",
        used = usage.used,
        total = usage.total,
    );
}

/// Label and usage of every resource line of the summary, in print order.
fn summary_rows(summary: &FittingSummary) -> [(&'static str, Usage); 17] {
    [
        ("high slots", summary.slots.hi),
        ("medium slots", summary.slots.med),
        ("low slots", summary.slots.low),
        ("rig slots", summary.slots.rig),
        ("subsystem slots", summary.slots.subsystem),
        ("turret hardpoints", summary.turret_hardpoints),
        ("launcher hardpoints", summary.launcher_hardpoints),
        ("cpu", summary.cpu),
        ("powergrid", summary.power),
        ("calibration", summary.calibration),
        ("drone bandwidth", summary.drone_bandwidth),
        ("drone bay", summary.drone_capacity),
        ("active drones", summary.active_drones),
        ("fighter tubes", summary.fighters.tubes),
        ("light squadrons", summary.fighters.light),
        ("support squadrons", summary.fighters.support),
        ("heavy squadrons", summary.fighters.heavy),
    ]
}

fn print_summary(summary: &FittingSummary) {
    for (label, usage) in summary_rows(summary) {
        print_usage(label, usage);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Calc {
            fit,
            content_dir,
            json,
        } => calc(&fit, &content_dir, json)?,
        Commands::Validate { content_dir } => validate(&content_dir)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_each_fighter_squadron_kind() {
        let mut summary = FittingSummary::default();
        summary.fighters.light = Usage::new(1.0, 3.0);
        summary.fighters.support = Usage::new(1.0, 1.0);
        summary.fighters.heavy = Usage::new(2.0, 1.0);

        let rows = summary_rows(&summary);
        let row = |label: &str| {
            rows.iter()
                .find(|(name, _)| *name == label)
                .map(|(_, usage)| *usage)
        };
        assert_eq!(row("light squadrons"), Some(Usage::new(1.0, 3.0)));
        assert_eq!(row("support squadrons"), Some(Usage::new(1.0, 1.0)));
        let heavy = row("heavy squadrons").unwrap();
        assert!(heavy.is_exceeded());
    }

    #[test]
    fn cli_parses_calc_with_defaults() {
        let cli = Cli::try_parse_from(["fit_cli", "calc", "--fit", "fits/rifter.json"]).unwrap();
        match cli.command {
            Commands::Calc {
                fit,
                content_dir,
                json,
            } => {
                assert_eq!(fit, "fits/rifter.json");
                assert_eq!(content_dir, "./content");
                assert!(!json);
            }
            Commands::Validate { .. } => panic!("expected calc"),
        }
    }
}
