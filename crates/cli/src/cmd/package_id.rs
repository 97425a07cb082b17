use anyhow::{Context, Result};

use nestrecipe_lib::{package_id, validate};

use super::RequestArgs;

pub fn cmd_package_id(request: &RequestArgs) -> Result<()> {
  let options = validate(request.option_set()?).context("Invalid configuration")?;
  let id = package_id(&options)?;
  println!("{}", id);
  Ok(())
}
