use anyhow::{bail, Result};

use gst_invoice::fmt::{amount_in_words, money};
use gst_invoice::states::{is_valid_gstin, state_code, state_from_gstin, state_name};

pub fn words(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        bail!("amount must be a finite number");
    }
    println!("{}", money(amount));
    println!("{} Only", amount_in_words(amount));
    Ok(())
}

pub fn state(query: &str) -> Result<()> {
    let query = query.trim();

    if query.len() == 15 {
        let Some(name) = state_from_gstin(query) else {
            bail!("no state for GSTIN prefix in {query}");
        };
        let validity = if is_valid_gstin(query) { "valid" } else { "malformed" };
        println!("{name} ({}), GSTIN {validity}", &query[..2]);
        return Ok(());
    }

    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        return match state_name(query) {
            Some(name) => {
                println!("{name}");
                Ok(())
            }
            None => bail!("unknown state code: {query}"),
        };
    }

    match state_code(query) {
        Some(code) => {
            println!("{code}");
            Ok(())
        }
        None => bail!("unknown state: {query}"),
    }
}
