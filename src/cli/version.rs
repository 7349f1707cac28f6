//! Version command implementation

use anyhow::Result;

use crate::{APP_NAME, VERSION};

pub fn run() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}

fn version_line() -> String {
    format!("{APP_NAME} version {VERSION}")
}
