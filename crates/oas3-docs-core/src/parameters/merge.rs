use super::resolve_parameter_ref;
use crate::{
  document::{ParameterLocation, ParameterOrRef},
  resolver::Resolver,
  schema::ObjectOrRef,
};

/// What makes two parameter entries the same parameter.
#[derive(Debug, PartialEq, Eq)]
enum ParameterKey {
  Declared(String, ParameterLocation),
  Unresolved(String),
}

fn parameter_key(parameter: &ParameterOrRef, resolver: Resolver<'_>) -> ParameterKey {
  match parameter {
    ObjectOrRef::Object(parameter) => ParameterKey::Declared(parameter.name.clone(), parameter.location),
    ObjectOrRef::Ref(reference) => match resolve_parameter_ref(resolver, &reference.ref_path) {
      Ok(target) => ParameterKey::Declared(target.name, target.location),
      Err(_) => ParameterKey::Unresolved(reference.ref_path.clone()),
    },
  }
}

/// Applies operation-level parameters on top of path-level ones.
///
/// An operation parameter with the same `name` and `in` as a path parameter
/// replaces it in place. References are resolved first so a `$ref` and an
/// inline override of the same parameter match; references that cannot be
/// followed only match the same pointer. Everything else is appended in
/// declaration order.
#[must_use]
pub fn merge_parameters(
  path_level: &[ParameterOrRef],
  operation_level: &[ParameterOrRef],
  resolver: Resolver<'_>,
) -> Vec<ParameterOrRef> {
  let mut merged = path_level.to_vec();
  let mut keys = path_level
    .iter()
    .map(|parameter| parameter_key(parameter, resolver))
    .collect::<Vec<_>>();

  for parameter in operation_level {
    let key = parameter_key(parameter, resolver);
    match keys.iter().position(|existing| *existing == key) {
      Some(index) => merged[index] = parameter.clone(),
      None => {
        merged.push(parameter.clone());
        keys.push(key);
      }
    }
  }

  merged
}
