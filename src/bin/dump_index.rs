//! Dump the topical index of a songbook as JSON.
//!
//! Usage: cargo run --bin dump_index -- songs.txt

use anyhow::{Context, Result};

use songpress::config::Config;
use songpress::convert;

fn main() -> Result<()> {
    let input = std::env::args()
        .nth(1)
        .context("usage: dump_index INPUT")?;

    let config = Config::load()?;
    let source = fs_err::read_to_string(&input)?;
    let conversion = convert(&source, &config.options());

    println!("{}", serde_json::to_string_pretty(&conversion.index)?);
    eprintln!(
        "{} songs, {} keywords, {} warnings",
        conversion.songs,
        conversion.index.len(),
        conversion.warnings.len()
    );
    Ok(())
}
