//! Show the about page

use anyhow::Result;

use crate::render::text;
use crate::Folio;

pub fn run(folio: &Folio) -> Result<()> {
    let config = &folio.config;
    if config.author.is_empty() {
        println!("{}", config.title);
    } else {
        println!("{} - {}", config.title, config.author);
    }
    println!();
    print!("{}", text::render_profile(folio.profile()));
    Ok(())
}
