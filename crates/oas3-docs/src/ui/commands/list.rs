use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use oas3_docs_core::{ApiReference, SlugOptions, sidebar::UNTAGGED};

use crate::{
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::load_reference,
};

/// One table row: route, method, path, primary tag.
type OperationRow = (String, String, String, String);

fn operation_rows(reference: &ApiReference) -> Vec<OperationRow> {
  reference
    .registry()
    .iter()
    .map(|(route, entry)| {
      (
        route.to_string(),
        entry.method.to_http().to_string(),
        entry.path.to_string(),
        entry.operation.primary_tag().unwrap_or(UNTAGGED).to_string(),
      )
    })
    .collect()
}

pub async fn list_operations(input: &Path, options: SlugOptions, colors: &Colors) -> anyhow::Result<()> {
  let reference = load_reference(input, options).await?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["ROUTE", "METHOD", "PATH", "TAG"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for (route, method, path, tag) in operation_rows(&reference) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(route)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(&method)
        .fg(IntoComfyColor::into(colors.method(&method)))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(tag).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
