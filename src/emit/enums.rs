use std::collections::HashSet;

use crate::emit::templates::{
    ENUM_MEMBERS_TEMPLATE, ENUM_NAMES_TEMPLATE, EnumClassContext, substitute,
};
use crate::model::EnumDecl;

/// Everything the emitter needs to know about a header's enum classes.
pub struct EnumModel {
    /// `cdef extern` declarations for every enum class, blank-line
    /// separated, trailing newline when non-empty.
    pub enum_class: String,
    /// Named-list constants bound inside the wrapper class body.
    pub enum_pyx: String,
    /// Type names that are enums, for per-property template dispatch.
    pub enum_types: HashSet<String>,
}

/// Build the declaration text and named lists for a header's enum classes.
/// A zero-member enum still gets a valid empty named list `()`; its member
/// binding lines are omitted since an empty `cdef` is not valid Cython.
pub fn make_enums(
    enum_classes: &[EnumDecl],
    header_file: &str,
    namespace: &str,
    classname: &str,
) -> EnumModel {
    let mut declarations = Vec::new();
    for ec in enum_classes {
        let ctx = EnumClassContext {
            header_file,
            namespace,
            classname,
            enum_name: &ec.name,
        };

        let mut block = ctx.render_cppclass();
        if ec.members.is_empty() {
            block.truncate(block.trim_end().len());
        } else {
            block.push('\n');
            block.push_str(&ctx.render_scope());
            block.push_str(&substitute(
                ENUM_MEMBERS_TEMPLATE,
                &[("enum_name", &ec.name), ("members", &ec.members.join(", "))],
            ));
        }
        declarations.push(block);
    }

    let mut enum_class = declarations.join("\n\n");
    if !enum_class.is_empty() {
        enum_class.push('\n');
    }

    let names: Vec<String> = enum_classes
        .iter()
        .map(|ec| {
            let values = if ec.members.is_empty() {
                "()".to_string()
            } else {
                ec.members
                    .iter()
                    .map(|m| format!("'{m}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let upper = ec.name.to_uppercase();
            substitute(ENUM_NAMES_TEMPLATE, &[("TYPE", &upper), ("values", &values)])
        })
        .collect();

    let mut enum_pyx = names.join("\n");
    if !enum_pyx.is_empty() {
        enum_pyx = format!("\n{enum_pyx}\n");
    }

    EnumModel {
        enum_class,
        enum_pyx,
        enum_types: enum_classes.iter().map(|ec| ec.name.clone()).collect(),
    }
}
