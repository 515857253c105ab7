//! Hello Example - a small control panel
//!
//! Demonstrates the basics:
//! - Building a configuration tree with groups and controls
//! - Subscribing to value changes
//! - Running the interactive loop (Tab to move focus, q to quit)
//!
//! Run with: cargo run --example hello

use tweak_tui::{create, Config, PanelOptions};

fn main() -> Result<(), tweak_tui::Error> {
    let config = Config::group(
        "hello",
        vec![
            Config::new("range")
                .id("gain")
                .attr("label", "Gain")
                .attr("min", 0)
                .attr("max", 11)
                .attr("value", 4),
            Config::new("select")
                .id("mode")
                .attr("label", "Mode")
                .attr("options", vec!["sine", "square", "saw"]),
            Config::new("toggle").id("mute").attr("label", "Mute"),
            Config::group(
                "advanced",
                vec![
                    Config::new("number")
                        .id("offset")
                        .attr("label", "Offset")
                        .attr("step", 0.5),
                    Config::new("color")
                        .id("tint")
                        .attr("label", "Tint")
                        .attr("value", "#88c0d0"),
                ],
            )
            .id("advanced")
            .attr("label", "Advanced")
            .attr("expanded", false),
            Config::new("text")
                .id("name")
                .attr("label", "Name")
                .attr("value", "osc-1"),
        ],
    )
    .id("hello");

    let panel = create(config, PanelOptions::default())?;

    let _on_mute = panel.subscribe("mute", |value| {
        tracing::info!(muted = value.is_truthy(), "mute toggled");
    });
    let _on_change = panel.subscribe_all(|id, value| {
        tracing::info!(id = %id, value = %value.display(), "changed");
    });

    panel.run()?;
    panel.destroy();
    Ok(())
}
