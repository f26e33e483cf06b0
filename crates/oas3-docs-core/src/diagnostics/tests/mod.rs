use super::Diagnostic;

#[test]
fn test_structured_fields() {
  let cases = [
    (
      Diagnostic::UnresolvedReference {
        reference: "#/components/schemas/Gone".to_string(),
        field: "body.owner".to_string(),
      },
      Some("#/components/schemas/Gone"),
      Some("body.owner"),
    ),
    (
      Diagnostic::ExpansionLimit {
        reference: "#/components/schemas/L9".to_string(),
        field: "root.a".to_string(),
      },
      Some("#/components/schemas/L9"),
      Some("root.a"),
    ),
    (
      Diagnostic::UnresolvedParameter {
        reference: "#/components/parameters/Gone".to_string(),
        operation: "GET /pets".to_string(),
      },
      Some("#/components/parameters/Gone"),
      Some("GET /pets"),
    ),
    (
      Diagnostic::NonObjectBody {
        operation: "POST /pets".to_string(),
        found: "array".to_string(),
      },
      None,
      Some("POST /pets"),
    ),
    (
      Diagnostic::UnknownSchemaType {
        type_name: "file".to_string(),
        field: "upload".to_string(),
      },
      None,
      Some("upload"),
    ),
    (
      Diagnostic::InvalidPattern {
        pattern: "(".to_string(),
        error: "unclosed group".to_string(),
      },
      None,
      None,
    ),
  ];

  for (diagnostic, reference, field) in cases {
    assert_eq!(diagnostic.reference(), reference, "reference of {diagnostic}");
    assert_eq!(diagnostic.field(), field, "field of {diagnostic}");
  }
}

#[test]
fn test_expansion_limit_is_a_reference_error() {
  let diagnostic = Diagnostic::ExpansionLimit {
    reference: "#/components/schemas/L2".to_string(),
    field: "root.a.a".to_string(),
  };

  assert!(diagnostic.is_reference_error());
  assert_eq!(
    diagnostic.to_string(),
    "Reference expansion limit reached at '#/components/schemas/L2' for 'root.a.a'"
  );
}
