//! Class file header parsing.
//!
//! Only the prefix of the file is read: magic, version, constant pool, access
//! flags, this/super class and the interface list. Fields, methods and
//! attributes follow but carry nothing the analyzer needs.

use std::collections::BTreeSet;

use crate::constant_pool::ConstantPool;
use crate::cursor::ByteCursor;
use crate::error::{ClassFileError, Result};
use crate::model::ClassDescriptor;
use crate::resolve::ReferenceResolver;
use crate::version::ClassVersion;

pub const MAGIC: u32 = 0xCAFE_BABE;

/// Header fields exactly as stored, before any index is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClassFile {
    pub version: ClassVersion,
    pub constant_pool: ConstantPool,
    pub this_class: u16,
    /// `0` means no superclass.
    pub super_class: u16,
    pub interfaces: Vec<u16>,
}

impl RawClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(bytes);

        let magic = cursor.read_u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::NotAClassFile { magic });
        }

        let minor = cursor.read_u16()?;
        let major = cursor.read_u16()?;
        let count = cursor.read_u16()?;
        let constant_pool = ConstantPool::decode(&mut cursor, count)?;

        let _access_flags = cursor.read_u16()?;
        let this_class = cursor.read_u16()?;
        let super_class = cursor.read_u16()?;

        let interfaces_count = cursor.read_u16()?;
        let interfaces = (0..interfaces_count)
            .map(|_| cursor.read_u16())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: ClassVersion::new(major, minor),
            constant_pool,
            this_class,
            super_class,
            interfaces,
        })
    }

    pub fn resolve(&self, source_label: impl Into<String>) -> Result<ClassDescriptor> {
        let resolver = ReferenceResolver::new(&self.constant_pool);

        let class_name = resolver.class_name(self.this_class)?;
        let super_class_name = match self.super_class {
            0 => None,
            index => Some(resolver.class_name(index)?),
        };
        let interface_names = self
            .interfaces
            .iter()
            .map(|&index| resolver.class_name(index))
            .collect::<Result<BTreeSet<_>>>()?;
        let (field_references, method_references) = resolver.member_references()?;

        Ok(ClassDescriptor::new(
            class_name,
            source_label.into(),
            super_class_name,
            interface_names,
            self.version,
            field_references,
            method_references,
        ))
    }
}

/// Parses and resolves one class file in a single step.
pub fn parse_class(bytes: &[u8], source_label: impl Into<String>) -> Result<ClassDescriptor> {
    RawClassFile::parse(bytes)?.resolve(source_label)
}
