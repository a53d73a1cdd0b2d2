//! Turns constant pool indices into class, field and method identifiers.

use std::collections::BTreeSet;

use crate::constant_pool::{ConstantPool, ConstantPoolEntry, MemberRefInfo};
use crate::error::{ClassFileError, Result};
use crate::model::{FieldRef, FieldType, MethodRef};

pub struct ReferenceResolver<'a> {
    pool: &'a ConstantPool,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(pool: &'a ConstantPool) -> Self {
        Self { pool }
    }

    pub fn utf8(&self, index: u16) -> Result<&'a str> {
        match self.pool.get(index)? {
            ConstantPoolEntry::Utf8(text) => Ok(text),
            other => Err(wrong_kind(index, "Utf8", other)),
        }
    }

    /// `Class` entry → dotted class name.
    pub fn class_name(&self, index: u16) -> Result<String> {
        match self.pool.get(index)? {
            ConstantPoolEntry::Class { name_index } => Ok(dotted(self.utf8(*name_index)?)),
            other => Err(wrong_kind(index, "Class", other)),
        }
    }

    /// `NameAndType` entry → `(name, raw descriptor)`.
    pub fn name_and_type(&self, index: u16) -> Result<(&'a str, &'a str)> {
        match self.pool.get(index)? {
            ConstantPoolEntry::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((self.utf8(*name_index)?, self.utf8(*descriptor_index)?)),
            other => Err(wrong_kind(index, "NameAndType", other)),
        }
    }

    pub fn field_ref(&self, info: MemberRefInfo) -> Result<FieldRef> {
        let owner_class = self.class_name(info.class_index)?;
        let (name, descriptor) = self.name_and_type(info.name_and_type_index)?;
        Ok(FieldRef {
            owner_class,
            field_type: decode_field_type(descriptor),
            field_name: name.to_string(),
        })
    }

    pub fn method_ref(&self, info: MemberRefInfo) -> Result<MethodRef> {
        let owner_class = self.class_name(info.class_index)?;
        let (name, descriptor) = self.name_and_type(info.name_and_type_index)?;
        Ok(MethodRef {
            owner_class,
            method_name: name.to_string(),
            descriptor: descriptor.to_string(),
        })
    }

    /// Single ascending pass over the pool collecting every member reference.
    pub fn member_references(&self) -> Result<(BTreeSet<FieldRef>, BTreeSet<MethodRef>)> {
        let mut fields = BTreeSet::new();
        let mut methods = BTreeSet::new();

        for (_, entry) in self.pool.iter() {
            match entry {
                ConstantPoolEntry::Fieldref(info) => {
                    fields.insert(self.field_ref(*info)?);
                }
                ConstantPoolEntry::Methodref(info) | ConstantPoolEntry::InterfaceMethodref(info) => {
                    methods.insert(self.method_ref(*info)?);
                }
                ConstantPoolEntry::Utf8(_)
                | ConstantPoolEntry::Integer(_)
                | ConstantPoolEntry::Float(_)
                | ConstantPoolEntry::Long(_)
                | ConstantPoolEntry::Double(_)
                | ConstantPoolEntry::Class { .. }
                | ConstantPoolEntry::String { .. }
                | ConstantPoolEntry::NameAndType { .. }
                | ConstantPoolEntry::MethodHandle { .. }
                | ConstantPoolEntry::MethodType { .. }
                | ConstantPoolEntry::Dynamic { .. }
                | ConstantPoolEntry::InvokeDynamic { .. }
                | ConstantPoolEntry::Module { .. }
                | ConstantPoolEntry::Package { .. }
                | ConstantPoolEntry::Unusable => {}
            }
        }

        Ok((fields, methods))
    }
}

/// `Lpkg/Name;` → `Object("pkg.Name")`, anything else is kept verbatim.
pub fn decode_field_type(descriptor: &str) -> FieldType {
    match descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
    {
        Some(path) if !path.is_empty() && !path.contains(';') => FieldType::Object(dotted(path)),
        _ => FieldType::Descriptor(descriptor.to_string()),
    }
}

pub fn dotted(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}

fn wrong_kind(index: u16, expected: &'static str, found: &ConstantPoolEntry) -> ClassFileError {
    ClassFileError::InvalidConstantPoolReference {
        index,
        expected,
        found: found.kind(),
    }
}
