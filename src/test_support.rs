//! In-memory class file assembly for unit tests.
//!
//! The fixtures mirror what javac emits for a handful of tiny classes, close
//! enough that the constant pools carry the same references.

use crate::constant_pool::{self, ConstantPool};
use crate::cursor::ByteCursor;

#[derive(Debug, Clone)]
pub(crate) struct PoolBuilder {
    bytes: Vec<u8>,
    next: u16,
}

impl PoolBuilder {
    pub(crate) fn new() -> Self {
        Self {
            bytes: Vec::new(),
            next: 1,
        }
    }

    fn push(&mut self, tag: u8, payload: &[u8], slots: u16) -> u16 {
        let index = self.next;
        self.bytes.push(tag);
        self.bytes.extend_from_slice(payload);
        self.next += slots;
        index
    }

    pub(crate) fn utf8(&mut self, text: &str) -> u16 {
        let mut payload = (text.len() as u16).to_be_bytes().to_vec();
        payload.extend_from_slice(text.as_bytes());
        self.push(constant_pool::TAG_UTF8, &payload, 1)
    }

    pub(crate) fn raw_class(&mut self, name_index: u16) -> u16 {
        self.push(constant_pool::TAG_CLASS, &name_index.to_be_bytes(), 1)
    }

    pub(crate) fn class(&mut self, internal_name: &str) -> u16 {
        let name = self.utf8(internal_name);
        self.raw_class(name)
    }

    pub(crate) fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        let mut payload = name.to_be_bytes().to_vec();
        payload.extend_from_slice(&descriptor.to_be_bytes());
        self.push(constant_pool::TAG_NAME_AND_TYPE, &payload, 1)
    }

    fn raw_member(&mut self, tag: u8, class_index: u16, name_and_type_index: u16) -> u16 {
        let mut payload = class_index.to_be_bytes().to_vec();
        payload.extend_from_slice(&name_and_type_index.to_be_bytes());
        self.push(tag, &payload, 1)
    }

    pub(crate) fn raw_method_ref(&mut self, class_index: u16, name_and_type_index: u16) -> u16 {
        self.raw_member(constant_pool::TAG_METHODREF, class_index, name_and_type_index)
    }

    fn member(&mut self, tag: u8, owner: &str, name: &str, descriptor: &str) -> u16 {
        let class = self.class(owner);
        let nat = self.name_and_type(name, descriptor);
        self.raw_member(tag, class, nat)
    }

    pub(crate) fn field_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member(constant_pool::TAG_FIELDREF, owner, name, descriptor)
    }

    pub(crate) fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member(constant_pool::TAG_METHODREF, owner, name, descriptor)
    }

    pub(crate) fn interface_method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member(constant_pool::TAG_INTERFACE_METHODREF, owner, name, descriptor)
    }

    pub(crate) fn string(&mut self, text: &str) -> u16 {
        let utf8 = self.utf8(text);
        self.push(constant_pool::TAG_STRING, &utf8.to_be_bytes(), 1)
    }

    pub(crate) fn long(&mut self, value: i64) -> u16 {
        self.push(constant_pool::TAG_LONG, &value.to_be_bytes(), 2)
    }

    pub(crate) fn decode(&self) -> ConstantPool {
        let mut cursor = ByteCursor::new(&self.bytes);
        ConstantPool::decode(&mut cursor, self.next).expect("test pool decodes")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ClassBuilder {
    pool: PoolBuilder,
    major: u16,
    minor: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
}

impl ClassBuilder {
    pub(crate) fn new(name: &str, super_class: Option<&str>) -> Self {
        let mut pool = PoolBuilder::new();
        let this_class = pool.class(name);
        let super_class = super_class.map(|s| pool.class(s)).unwrap_or(0);
        Self {
            pool,
            major: 61,
            minor: 0,
            this_class,
            super_class,
            interfaces: Vec::new(),
        }
    }

    pub(crate) fn version(mut self, major: u16, minor: u16) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    pub(crate) fn interface(mut self, name: &str) -> Self {
        let index = self.pool.class(name);
        self.interfaces.push(index);
        self
    }

    pub(crate) fn pool(&mut self) -> &mut PoolBuilder {
        &mut self.pool
    }

    /// Adds the attribute names javac always puts in the pool.
    pub(crate) fn with_boilerplate(mut self, source_file: &str) -> Self {
        for name in ["Code", "LineNumberTable", "SourceFile"] {
            self.pool.utf8(name);
        }
        self.pool.utf8(source_file);
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&self.minor.to_be_bytes());
        out.extend_from_slice(&self.major.to_be_bytes());
        out.extend_from_slice(&self.pool.next.to_be_bytes());
        out.extend_from_slice(&self.pool.bytes);
        out.extend_from_slice(&0x0021u16.to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());
        out.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for index in &self.interfaces {
            out.extend_from_slice(&index.to_be_bytes());
        }
        // fields, methods, attributes
        out.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        out
    }
}

/// `public class FieldHolder { public String testField; }`
pub(crate) fn field_holder() -> Vec<u8> {
    let mut class = ClassBuilder::new("FieldHolder", Some("java/lang/Object"))
        .with_boilerplate("FieldHolder.java");
    class.pool().method_ref("java/lang/Object", "<init>", "()V");
    class.pool().utf8("testField");
    class.pool().utf8("Ljava/lang/String;");
    class.build()
}

/// Writes `new FieldHolder().testField`.
pub(crate) fn field_accessor() -> Vec<u8> {
    let mut class = ClassBuilder::new("FieldAccessor", Some("java/lang/Object"))
        .with_boilerplate("FieldAccessor.java");
    let pool = class.pool();
    pool.method_ref("java/lang/Object", "<init>", "()V");
    pool.method_ref("FieldHolder", "<init>", "()V");
    pool.string("this is write operation");
    pool.field_ref("FieldHolder", "testField", "Ljava/lang/String;");
    class.build()
}

/// Calls `new MethodHolder().testMethod()`.
pub(crate) fn method_caller() -> Vec<u8> {
    let mut class = ClassBuilder::new("MethodCaller", Some("java/lang/Object"))
        .with_boilerplate("MethodCaller.java");
    let pool = class.pool();
    pool.method_ref("java/lang/Object", "<init>", "()V");
    pool.method_ref("MethodHolder", "<init>", "()V");
    pool.method_ref("MethodHolder", "testMethod", "()I");
    class.build()
}

/// Calls `close()` through a `java.io.Closeable` parameter.
pub(crate) fn interface_method_caller() -> Vec<u8> {
    let mut class = ClassBuilder::new("InterfaceMethodCaller", Some("java/lang/Object"))
        .with_boilerplate("InterfaceMethodCaller.java");
    let pool = class.pool();
    pool.method_ref("java/lang/Object", "<init>", "()V");
    pool.interface_method_ref("java/io/Closeable", "close", "()V");
    pool.utf8("Exceptions");
    pool.class("java/lang/Exception");
    class.build()
}

/// `public class InterfaceImplementer implements java.io.Closeable`
pub(crate) fn interface_implementer() -> Vec<u8> {
    let mut class = ClassBuilder::new("InterfaceImplementer", Some("java/lang/Object"))
        .interface("java/io/Closeable")
        .with_boilerplate("InterfaceImplementer.java");
    class.pool().method_ref("java/lang/Object", "<init>", "()V");
    class.pool().utf8("Exceptions");
    class.pool().class("java/io/IOException");
    class.build()
}

/// `public class SubClass extends InterfaceImplementer`, calling `close()` and
/// printing the caught `IOException`.
pub(crate) fn sub_class() -> Vec<u8> {
    let mut class = ClassBuilder::new("SubClass", Some("InterfaceImplementer"))
        .with_boilerplate("SubClass.java");
    let pool = class.pool();
    pool.method_ref("InterfaceImplementer", "<init>", "()V");
    pool.method_ref("SubClass", "close", "()V");
    pool.method_ref("java/io/IOException", "printStackTrace", "()V");
    pool.utf8("StackMapTable");
    class.build()
}

/// `java.lang.Object` has no superclass.
pub(crate) fn object() -> Vec<u8> {
    let mut class = ClassBuilder::new("java/lang/Object", None).with_boilerplate("Object.java");
    class.pool().long(0x7FFF_FFFF_FFFF);
    class.pool().method_ref("java/lang/Object", "hashCode", "()I");
    class.build()
}
