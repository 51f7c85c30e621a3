//! Check capture capabilities.

use chromacast_capture::list_monitors;

pub fn run() -> anyhow::Result<()> {
    println!("Chromacast capability check");
    println!();

    let monitors = list_monitors()?;
    if monitors.is_empty() {
        println!("  No monitors found — screen capture will not work.");
        return Ok(());
    }

    println!("  Monitors:");
    for (name, width, height, primary) in monitors {
        let marker = if primary { " (primary)" } else { "" };
        println!("    {name}: {width}x{height}{marker}");
    }

    Ok(())
}
