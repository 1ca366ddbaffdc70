use anyhow::Result;
use econcal_core::store::{COMMON_CURRENCIES, COUNTRIES};
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    for country in COUNTRIES {
        let currency = if COMMON_CURRENCIES.contains(&country.currency) {
            country.currency.bold().to_string()
        } else {
            country.currency.to_string()
        };
        println!("{}  {}  {}", country.code.dimmed(), currency, country.name);
    }
    Ok(())
}
