//! Beam Solver Example - Two-span continuous beam
//!
//! Run with `RUST_LOG=debug` to see the intermediate matrices, or pass
//! `--json` to print the full results as JSON.

use anyhow::{Context, Result};
use beam_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    let json = std::env::args().any(|arg| arg == "--json");

    //   P = 10 kN (Dead)         w = 5 kN/m (Live)
    //        |                  ||||||||||||||||
    //   |====v========^=========================|
    //  Fixed         Pin                 Vertical roller
    //   0 -- 4 m --- 1 -------- 4 m -----------2
    let mut model = BeamModel::new(
        &[4.0, 4.0],
        &[SupportType::Fixed, SupportType::Pin, SupportType::RollerVertical],
        Material::steel(),
        // 300 x 500 mm rectangle
        Section::rectangular(0.3, 0.5),
    )?;

    model.add_span_load(0, PointLoad::new(10_000.0, 2.0).with_case("Dead"))?;
    model.add_span_load(1, DistributedLoad::full_span(5_000.0, 4.0).with_case("Live"))?;

    model.add_load_combo(LoadCombination::single("D", "Dead"))?;
    model.add_load_combo(LoadCombination::lrfd_dead_live())?;

    let results = model
        .analyze(&AnalysisOptions::default())
        .context("beam analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("=== Beam Solver Example: Two-Span Continuous Beam ===\n");
    let positions = model.node_positions();

    for (combo_name, combo) in &results {
        println!("=== Results for {} ===\n", combo_name);

        println!("Node Displacements:");
        for (node, x) in positions.iter().enumerate() {
            let disp = combo.node_displacement(node)?;
            println!(
                "  Node {} (x={:.2}m): DY={:.4}mm, RZ={:.6}rad",
                node,
                x,
                disp.dy * 1000.0,
                disp.rz
            );
        }

        println!("\nSupport Reactions:");
        for (node, support) in model.supports.iter().enumerate() {
            let rxn = combo.node_reactions(node)?;
            println!(
                "  Node {} ({}): FY={:.2}kN, MZ={:.2}kN·m",
                node,
                support,
                rxn.fy / 1000.0,
                rxn.mz / 1000.0
            );
        }

        println!("\nSpan Diagrams:");
        for (shear, moment) in combo.shear.iter().zip(&combo.moment) {
            println!(
                "  Span {}: Vmax={:.2}kN at {:.2}m, Vmin={:.2}kN at {:.2}m",
                shear.span,
                shear.max.value / 1000.0,
                shear.offset + shear.max.x,
                shear.min.value / 1000.0,
                shear.offset + shear.min.x
            );
            println!(
                "          Mmax={:.2}kN·m at {:.2}m, Mmin={:.2}kN·m at {:.2}m",
                moment.max.value / 1000.0,
                moment.offset + moment.max.x,
                moment.min.value / 1000.0,
                moment.offset + moment.min.x
            );
        }

        let summary = combo.summary();
        println!("\nSummary:");
        println!("  Max displacement: {:.4}mm at node {}", summary.max_displacement * 1000.0, summary.max_disp_node);
        println!("  Max reaction: {:.2}kN at node {}", summary.max_reaction / 1000.0, summary.max_reaction_node);
        println!("  Max moment: {:.2}kN·m at {:.2}m", summary.max_moment / 1000.0, summary.max_moment_x);
        if let Some(statics) = combo.statics {
            println!(
                "  Statics: applied {:.2}kN, reacted {:.2}kN ({})",
                statics.applied / 1000.0,
                statics.reacted / 1000.0,
                if statics.balanced { "OK" } else { "MISMATCH" }
            );
        }
        println!();
    }

    println!("=== Analysis Complete ===");
    Ok(())
}
