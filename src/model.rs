//! Resolved, read-only view of one class file.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::version::ClassVersion;

/// Type of a referenced field.
///
/// Only plain object types (`Lpkg/Name;`) are decoded. Primitives and arrays
/// keep their raw descriptor and are not traced into the referenced classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldType {
    Object(String),
    Descriptor(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Object(name) | Self::Descriptor(name) => name,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            Self::Descriptor(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldRef {
    pub owner_class: String,
    pub field_type: FieldType,
    pub field_name: String,
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.field_type, self.owner_class, self.field_name)
    }
}

/// A `Methodref` or `InterfaceMethodref`; the two are indistinguishable here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodRef {
    pub owner_class: String,
    pub method_name: String,
    pub descriptor: String,
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner_class, self.method_name, self.descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    class_name: String,
    source_label: String,
    super_class_name: Option<String>,
    interface_names: BTreeSet<String>,
    version: ClassVersion,
    field_references: BTreeSet<FieldRef>,
    method_references: BTreeSet<MethodRef>,
    referenced_class_names: BTreeSet<String>,
}

impl ClassDescriptor {
    pub fn new(
        class_name: String,
        source_label: String,
        super_class_name: Option<String>,
        interface_names: BTreeSet<String>,
        version: ClassVersion,
        field_references: BTreeSet<FieldRef>,
        method_references: BTreeSet<MethodRef>,
    ) -> Self {
        let referenced_class_names = referenced_classes(
            super_class_name.as_deref(),
            &interface_names,
            &field_references,
            &method_references,
        );

        Self {
            class_name,
            source_label,
            super_class_name,
            interface_names,
            version,
            field_references,
            method_references,
            referenced_class_names,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// `None` only for `java.lang.Object`.
    pub fn super_class_name(&self) -> Option<&str> {
        self.super_class_name.as_deref()
    }

    pub fn interface_names(&self) -> &BTreeSet<String> {
        &self.interface_names
    }

    pub fn version(&self) -> ClassVersion {
        self.version
    }

    pub fn field_references(&self) -> &BTreeSet<FieldRef> {
        &self.field_references
    }

    pub fn method_references(&self) -> &BTreeSet<MethodRef> {
        &self.method_references
    }

    /// Superclass, interfaces, field owners and object field types, method owners.
    pub fn referenced_class_names(&self) -> &BTreeSet<String> {
        &self.referenced_class_names
    }
}

fn referenced_classes(
    super_class_name: Option<&str>,
    interface_names: &BTreeSet<String>,
    field_references: &BTreeSet<FieldRef>,
    method_references: &BTreeSet<MethodRef>,
) -> BTreeSet<String> {
    let mut classes = BTreeSet::new();

    if let Some(name) = super_class_name {
        classes.insert(name.to_string());
    }
    classes.extend(interface_names.iter().cloned());
    for field in field_references {
        classes.insert(field.owner_class.clone());
        if let Some(name) = field.field_type.class_name() {
            classes.insert(name.to_string());
        }
    }
    classes.extend(method_references.iter().map(|m| m.owner_class.clone()));

    classes
}
