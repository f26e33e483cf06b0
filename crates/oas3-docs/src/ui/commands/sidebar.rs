use std::path::Path;

use oas3_docs_core::SlugOptions;

use crate::utils::spec::load_reference;

pub async fn print_sidebar(input: &Path, options: SlugOptions) -> anyhow::Result<()> {
  let reference = load_reference(input, options).await?;
  println!("{}", serde_json::to_string_pretty(&reference.sidebar())?);
  Ok(())
}
