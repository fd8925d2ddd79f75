//! 카테고리 목록 출력.

use anyhow::Result;

use crate::render::{render_categories, OutputFormat};

pub fn list_categories(format: OutputFormat) -> Result<()> {
    println!("{}", render_categories(format)?);
    Ok(())
}
