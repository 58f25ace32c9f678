use std::collections::{HashMap, HashSet};

/// Everything extracted from one binding header. Read-only once parsed.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct HeaderModel {
    /// Name of the enclosing class.
    pub classname: String,
    /// Namespace chain in declaration order.
    pub namespaces: Vec<String>,
    pub enum_classes: Vec<EnumDecl>,
    /// Member declaration lines of the inner struct, in declaration order.
    pub structs: Vec<StructDecl>,
    /// Type name of the first inner struct block, if the header has one.
    /// The struct mirror is declared under this name.
    pub struct_name: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct EnumDecl {
    pub name: String,
    /// Member names in declaration order; index i is the runtime value i.
    pub members: Vec<String>,
}

/// One member declaration line: a declared type plus its declarator names,
/// e.g. `float begin, end;` becomes `{ typename: "float", variables: ["begin", "end"] }`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct StructDecl {
    pub typename: String,
    pub variables: Vec<String>,
}

/// How a property is emitted, decided once when the model is built.
#[derive(Debug, PartialEq, Clone)]
pub enum PropertyKind {
    /// Raw get/set of the declared C++ type.
    Plain(String),
    /// Name-or-index set, symbolic-name get against the enum's named list.
    Enum(String),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
}

impl HeaderModel {
    /// Namespace chain joined with the C++ scope separator.
    pub fn namespace(&self) -> String {
        self.namespaces.join("::")
    }

    /// The C++ type the wrapper mirrors: the inner struct when the header
    /// declares one, the enclosing class otherwise.
    pub fn mirror_name(&self) -> &str {
        self.struct_name.as_deref().unwrap_or(&self.classname)
    }

    /// Names of all declared enum classes.
    pub fn enum_types(&self) -> HashSet<&str> {
        self.enum_classes.iter().map(|e| e.name.as_str()).collect()
    }

    /// Variable name -> owning enum type, for every member declared with an
    /// enum-class type.
    pub fn variable_enum_index(&self) -> HashMap<&str, &str> {
        let enum_types = self.enum_types();
        let mut index = HashMap::new();
        for s in &self.structs {
            if enum_types.contains(s.typename.as_str()) {
                for v in &s.variables {
                    index.insert(v.as_str(), s.typename.as_str());
                }
            }
        }
        index
    }

    /// All properties in struct-then-member declaration order, each tagged
    /// plain or enum-aware.
    pub fn properties(&self) -> Vec<Property> {
        let enum_types = self.enum_types();
        let mut props = Vec::new();
        for s in &self.structs {
            for v in &s.variables {
                let kind = if enum_types.contains(s.typename.as_str()) {
                    PropertyKind::Enum(s.typename.clone())
                } else {
                    PropertyKind::Plain(s.typename.clone())
                };
                props.push(Property {
                    name: v.clone(),
                    kind,
                });
            }
        }
        props
    }
}
