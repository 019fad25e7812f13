//! Maps schema files to generated identifiers.
//!
//! One resolver instance is constructed per generation run and owned by the
//! caller; lookups are cached per instance, so there is no process-wide
//! naming state.

use crate::codegen::NamespaceStyle;
use descwire_types::SchemaFile;
use std::collections::HashMap;
use thiserror::Error;

pub struct NameResolver {
    style: NamespaceStyle,
    holder_names: HashMap<String, String>,
    namespaces: HashMap<String, String>,
}

impl NameResolver {
    pub fn new(style: NamespaceStyle) -> Self {
        Self {
            style,
            holder_names: HashMap::new(),
            namespaces: HashMap::new(),
        }
    }

    /* Identifier of the holder class that carries the file's descriptor,
     * e.g. "proto/user_events.schema" -> "UserEventsSchema" */
    pub fn holder_class_name(&mut self, file: &SchemaFile) -> String {
        if let Some(name) = self.holder_names.get(&file.name) {
            return name.clone();
        }
        let name = format!("{}Schema", upper_camel_case(file.basename()));
        self.holder_names.insert(file.name.clone(), name.clone());
        name
    }

    /* Package/namespace string for the generated file; may be empty */
    pub fn namespace(&mut self, file: &SchemaFile) -> Result<String, NameError> {
        if let Some(namespace) = self.namespaces.get(&file.name) {
            return Ok(namespace.clone());
        }

        if !file.package.is_empty() {
            for segment in file.package.split('.') {
                if !is_valid_segment(segment) {
                    return Err(NameError::MalformedPackage {
                        file: file.name.clone(),
                        package: file.package.clone(),
                    });
                }
            }
        }

        let namespace = match self.style {
            NamespaceStyle::SchemaPackage => file.package.clone(),
            NamespaceStyle::Prefixed => {
                if file.package.is_empty() {
                    "gen".to_string()
                } else {
                    format!("gen.{}", file.package)
                }
            }
        };
        self.namespaces.insert(file.name.clone(), namespace.clone());
        Ok(namespace)
    }

    /* Fully-qualified holder name: namespace + "." + class, or the bare
     * class name when the namespace is empty */
    pub fn qualified_holder_name(&mut self, file: &SchemaFile) -> Result<String, NameError> {
        let class_name = self.holder_class_name(file);
        let namespace = self.namespace(file)?;
        if namespace.is_empty() {
            Ok(class_name)
        } else {
            Ok(format!("{}.{}", namespace, class_name))
        }
    }
}

fn upper_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            /* Separators ('_', '-', anything else) just capitalize what
             * follows */
            upper_next = true;
        }
    }
    if out.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(true) {
        out.insert(0, 'X');
    }
    out
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Error)]
pub enum NameError {
    #[error("schema file '{file}' has malformed package '{package}'")]
    MalformedPackage { file: String, package: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, package: &str) -> SchemaFile {
        SchemaFile {
            name: name.into(),
            package: package.into(),
            dependencies: vec![],
            records: vec![],
        }
    }

    #[test]
    fn holder_name_is_camel_cased_basename_with_suffix() {
        let mut resolver = NameResolver::new(NamespaceStyle::SchemaPackage);
        assert_eq!(
            resolver.holder_class_name(&file("proto/user_events.schema", "")),
            "UserEventsSchema"
        );
        assert_eq!(
            resolver.holder_class_name(&file("common.schema", "")),
            "CommonSchema"
        );
        /* Leading digits cannot start a Java identifier */
        assert_eq!(
            resolver.holder_class_name(&file("proto/2fa.schema", "")),
            "X2faSchema"
        );
    }

    #[test]
    fn namespace_follows_style() {
        let mut plain = NameResolver::new(NamespaceStyle::SchemaPackage);
        assert_eq!(
            plain.namespace(&file("a.schema", "acme.events")).unwrap(),
            "acme.events"
        );
        assert_eq!(plain.namespace(&file("b.schema", "")).unwrap(), "");

        let mut prefixed = NameResolver::new(NamespaceStyle::Prefixed);
        assert_eq!(
            prefixed.namespace(&file("a.schema", "acme.events")).unwrap(),
            "gen.acme.events"
        );
        assert_eq!(prefixed.namespace(&file("b.schema", "")).unwrap(), "gen");
    }

    #[test]
    fn qualified_name_handles_empty_namespace() {
        /* distinct file names: the resolver caches by file name, which is
         * a unique key within one run */
        let mut resolver = NameResolver::new(NamespaceStyle::SchemaPackage);
        assert_eq!(
            resolver
                .qualified_holder_name(&file("common.schema", ""))
                .unwrap(),
            "CommonSchema"
        );
        assert_eq!(
            resolver
                .qualified_holder_name(&file("acme/common.schema", "acme"))
                .unwrap(),
            "acme.CommonSchema"
        );
    }

    #[test]
    fn malformed_package_is_fatal() {
        let mut resolver = NameResolver::new(NamespaceStyle::SchemaPackage);
        for package in ["acme..events", "1bad", "acme.ev ents", "."] {
            let err = resolver
                .namespace(&file("a.schema", package))
                .expect_err(package);
            assert!(matches!(err, NameError::MalformedPackage { .. }));
        }
    }

    #[test]
    fn lookups_are_cached_per_instance() {
        let mut resolver = NameResolver::new(NamespaceStyle::SchemaPackage);
        let f = file("proto/user_events.schema", "acme");
        let first = resolver.qualified_holder_name(&f).unwrap();
        let second = resolver.qualified_holder_name(&f).unwrap();
        assert_eq!(first, second);
    }
}
