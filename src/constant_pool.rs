//! Constant pool decoding.
//!
//! Entries are decoded structurally only. Anything that points at another entry
//! keeps the raw index; [`crate::resolve::ReferenceResolver`] follows those
//! indices once the whole pool is available, which is what makes forward
//! references work without a second pass over the bytes.

use java_string::JavaStr;

use crate::cursor::ByteCursor;
use crate::error::{ClassFileError, Result};

pub const TAG_UTF8: u8 = 1;
pub const TAG_INTEGER: u8 = 3;
pub const TAG_FLOAT: u8 = 4;
pub const TAG_LONG: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_CLASS: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_FIELDREF: u8 = 9;
pub const TAG_METHODREF: u8 = 10;
pub const TAG_INTERFACE_METHODREF: u8 = 11;
pub const TAG_NAME_AND_TYPE: u8 = 12;
pub const TAG_METHOD_HANDLE: u8 = 15;
pub const TAG_METHOD_TYPE: u8 = 16;
pub const TAG_DYNAMIC: u8 = 17;
pub const TAG_INVOKE_DYNAMIC: u8 = 18;
pub const TAG_MODULE: u8 = 19;
pub const TAG_PACKAGE: u8 = 20;

/// `class_index` + `name_and_type_index`, shared by the three member reference tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstantPoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class {
        name_index: u16,
    },
    String {
        string_index: u16,
    },
    Fieldref(MemberRefInfo),
    Methodref(MemberRefInfo),
    InterfaceMethodref(MemberRefInfo),
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    MethodHandle {
        reference_kind: u8,
        reference_index: u16,
    },
    MethodType {
        descriptor_index: u16,
    },
    Dynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
    Module {
        name_index: u16,
    },
    Package {
        name_index: u16,
    },
    /// Second slot of a `Long` or `Double`. Never a valid reference target.
    Unusable,
}

impl ConstantPoolEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Utf8(_) => "Utf8",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Long(_) => "Long",
            Self::Double(_) => "Double",
            Self::Class { .. } => "Class",
            Self::String { .. } => "String",
            Self::Fieldref(_) => "Fieldref",
            Self::Methodref(_) => "Methodref",
            Self::InterfaceMethodref(_) => "InterfaceMethodref",
            Self::NameAndType { .. } => "NameAndType",
            Self::MethodHandle { .. } => "MethodHandle",
            Self::MethodType { .. } => "MethodType",
            Self::Dynamic { .. } => "Dynamic",
            Self::InvokeDynamic { .. } => "InvokeDynamic",
            Self::Module { .. } => "Module",
            Self::Package { .. } => "Package",
            Self::Unusable => "unusable slot",
        }
    }

    fn occupies_two_slots(&self) -> bool {
        matches!(self, Self::Long(_) | Self::Double(_))
    }

    fn decode(cursor: &mut ByteCursor<'_>, index: u16) -> Result<Self> {
        let tag = cursor.read_u8()?;
        let entry = match tag {
            TAG_UTF8 => {
                let len = cursor.read_u16()? as usize;
                Self::Utf8(decode_modified_utf8(cursor.read_bytes(len)?))
            }
            TAG_INTEGER => Self::Integer(cursor.read_u32()? as i32),
            TAG_FLOAT => Self::Float(f32::from_bits(cursor.read_u32()?)),
            TAG_LONG => Self::Long(cursor.read_u64()? as i64),
            TAG_DOUBLE => Self::Double(f64::from_bits(cursor.read_u64()?)),
            TAG_CLASS => Self::Class {
                name_index: cursor.read_u16()?,
            },
            TAG_STRING => Self::String {
                string_index: cursor.read_u16()?,
            },
            TAG_FIELDREF => Self::Fieldref(read_member_ref(cursor)?),
            TAG_METHODREF => Self::Methodref(read_member_ref(cursor)?),
            TAG_INTERFACE_METHODREF => Self::InterfaceMethodref(read_member_ref(cursor)?),
            TAG_NAME_AND_TYPE => Self::NameAndType {
                name_index: cursor.read_u16()?,
                descriptor_index: cursor.read_u16()?,
            },
            TAG_METHOD_HANDLE => Self::MethodHandle {
                reference_kind: cursor.read_u8()?,
                reference_index: cursor.read_u16()?,
            },
            TAG_METHOD_TYPE => Self::MethodType {
                descriptor_index: cursor.read_u16()?,
            },
            TAG_DYNAMIC => Self::Dynamic {
                bootstrap_method_attr_index: cursor.read_u16()?,
                name_and_type_index: cursor.read_u16()?,
            },
            TAG_INVOKE_DYNAMIC => Self::InvokeDynamic {
                bootstrap_method_attr_index: cursor.read_u16()?,
                name_and_type_index: cursor.read_u16()?,
            },
            TAG_MODULE => Self::Module {
                name_index: cursor.read_u16()?,
            },
            TAG_PACKAGE => Self::Package {
                name_index: cursor.read_u16()?,
            },
            _ => return Err(ClassFileError::UnsupportedConstantTag { tag, index }),
        };
        Ok(entry)
    }
}

fn read_member_ref(cursor: &mut ByteCursor<'_>) -> Result<MemberRefInfo> {
    Ok(MemberRefInfo {
        class_index: cursor.read_u16()?,
        name_and_type_index: cursor.read_u16()?,
    })
}

/// Decoded constant pool, addressed with the class file's 1-based indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
    // entries[0] is pool index 1
    entries: Vec<ConstantPoolEntry>,
}

impl ConstantPool {
    /// Decodes `count - 1` slots from a cursor positioned right after
    /// `constant_pool_count`.
    pub fn decode(cursor: &mut ByteCursor<'_>, count: u16) -> Result<Self> {
        let slots = count.saturating_sub(1) as usize;
        let mut entries = Vec::with_capacity(slots);

        while entries.len() < slots {
            let index = (entries.len() + 1) as u16;
            let entry = ConstantPoolEntry::decode(cursor, index)?;
            let wide = entry.occupies_two_slots();
            entries.push(entry);
            if wide {
                entries.push(ConstantPoolEntry::Unusable);
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u16) -> Result<&ConstantPoolEntry> {
        if index == 0 {
            return Err(invalid_index(index));
        }
        match self.entries.get(index as usize - 1) {
            Some(ConstantPoolEntry::Unusable) => Err(ClassFileError::InvalidConstantPoolReference {
                index,
                expected: "a usable entry",
                found: ConstantPoolEntry::Unusable.kind(),
            }),
            Some(entry) => Ok(entry),
            None => Err(invalid_index(index)),
        }
    }

    /// Iterates `(index, entry)` in ascending index order, skipping unusable slots.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ConstantPoolEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !matches!(entry, ConstantPoolEntry::Unusable))
            .map(|(i, entry)| ((i + 1) as u16, entry))
    }
}

fn invalid_index(index: u16) -> ClassFileError {
    ClassFileError::InvalidConstantPoolReference {
        index,
        expected: "an index inside the constant pool",
        found: "out of range",
    }
}

/// Decodes the class-file flavour of UTF-8: NUL as `C0 80` and supplementary
/// characters as surrogate pairs. Anything that is not valid modified UTF-8,
/// four-byte sequences and unpaired surrogates included, becomes U+FFFD.
pub fn decode_modified_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match JavaStr::from_modified_utf8(rest) {
            Ok(decoded) => {
                text.push_str(&decoded.as_str_lossy());
                return text;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                if let Ok(decoded) = JavaStr::from_modified_utf8(valid) {
                    text.push_str(&decoded.as_str_lossy());
                }
                text.push(char::REPLACEMENT_CHARACTER);
                // no error length means the input ended mid-sequence
                let bad = err.error_len().map_or(invalid.len(), |n| n as usize);
                rest = &invalid[bad.max(1).min(invalid.len())..];
                if rest.is_empty() {
                    return text;
                }
            }
        }
    }
}
