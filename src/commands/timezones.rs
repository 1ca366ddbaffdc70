use anyhow::Result;
use econcal_core::timezone::DisplayTimezone;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    for zone in DisplayTimezone::ALL {
        let marker = if zone == DisplayTimezone::default() { "*" } else { " " };
        println!("{} {:<18} {}", marker, zone.id(), zone.label().dimmed());
    }
    Ok(())
}
