//! Emission templates. Every template is a named constant with `$var`
//! placeholders and sits next to the context struct listing exactly the
//! fields it consumes.

/// Replace `$name` and `${name}` placeholders with their values. Unknown
/// placeholders are left as-is.
pub(crate) fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let lookup = |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(braced) = rest.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                if let Some(value) = lookup(&braced[..end]) {
                    out.push_str(value);
                    rest = &braced[end + 1..];
                    continue;
                }
            }
            out.push('$');
            continue;
        }

        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        match lookup(&rest[..end]) {
            Some(value) if end > 0 => {
                out.push_str(value);
                rest = &rest[end..];
            }
            _ => out.push('$'),
        }
    }
    out.push_str(rest);
    out
}

/// First line of every generated file. Golden comparisons mask the
/// timestamp by dropping this line.
pub(crate) const PREAMBLE_TEMPLATE: &str =
    "# Auto-generated by pyxgen at $timestamp (range=$range)\n";

pub(crate) struct PreambleContext<'a> {
    pub timestamp: &'a str,
    pub range: &'a str,
}

impl PreambleContext<'_> {
    pub fn render(&self) -> String {
        substitute(
            PREAMBLE_TEMPLATE,
            &[("timestamp", self.timestamp), ("range", self.range)],
        )
    }
}

/// Extern declaration of one enum class as an opaque cppclass.
pub(crate) const ENUM_CLASS_TEMPLATE: &str = "\
cdef extern from \"<$header_file>\" namespace \"$namespace::$classname\":
    cdef cppclass $enum_name:
        pass
";

/// Extern block binding the enum's members under their own scope; the
/// `cdef $enum_name A, B` line is appended by the builder.
pub(crate) const ENUM_SCOPE_TEMPLATE: &str = "\
cdef extern from \"<$header_file>\" namespace \"$namespace::$classname::$enum_name\":
";

pub(crate) const ENUM_MEMBERS_TEMPLATE: &str = "    cdef $enum_name $members";

/// Named-list constant bound inside the wrapper class body; index i is the
/// runtime value of member i.
pub(crate) const ENUM_NAMES_TEMPLATE: &str = "    ${TYPE}_NAMES = $values";

pub(crate) struct EnumClassContext<'a> {
    pub header_file: &'a str,
    pub namespace: &'a str,
    pub classname: &'a str,
    pub enum_name: &'a str,
}

impl EnumClassContext<'_> {
    fn vars(&self) -> [(&str, &str); 4] {
        [
            ("header_file", self.header_file),
            ("namespace", self.namespace),
            ("classname", self.classname),
            ("enum_name", self.enum_name),
        ]
    }

    pub fn render_cppclass(&self) -> String {
        substitute(ENUM_CLASS_TEMPLATE, &self.vars())
    }

    pub fn render_scope(&self) -> String {
        substitute(ENUM_SCOPE_TEMPLATE, &self.vars())
    }
}

/// Wrapper class block: struct mirror, hidden instance, named lists, reset,
/// `__str__`, and the property blocks.
pub(crate) const CLASS_TEMPLATE: &str = "\

cdef extern from \"<$header_file>\" namespace \"$namespace\":
$struct_definition

cdef class _$classname(_Wrapper):$class_documentation
    cdef $struct_type $member_name;
$enum_pyx
    def __cinit__(self):
        clearStruct(self.$member_name)

    def clear(self):
        clearStruct(self.$member_name)

    def __str__(self):
        return \"($str_format)\" % (
            $variable_names)

$property_list";

/// Docstring slot of the wrapper class, rendered only when the batch
/// config carries documentation.
pub(crate) const DOC_TEMPLATE: &str = "\n    \"\"\"$class_documentation\"\"\"";

pub(crate) struct ClassContext<'a> {
    pub header_file: &'a str,
    pub namespace: &'a str,
    pub classname: &'a str,
    pub struct_type: &'a str,
    pub struct_definition: &'a str,
    /// Pre-rendered docstring block, empty for none.
    pub class_documentation: &'a str,
    pub member_name: &'a str,
    pub enum_pyx: &'a str,
    pub str_format: &'a str,
    pub variable_names: &'a str,
    pub property_list: &'a str,
}

impl ClassContext<'_> {
    pub fn render(&self) -> String {
        substitute(
            CLASS_TEMPLATE,
            &[
                ("header_file", self.header_file),
                ("namespace", self.namespace),
                ("classname", self.classname),
                ("struct_type", self.struct_type),
                ("struct_definition", self.struct_definition),
                ("class_documentation", self.class_documentation),
                ("member_name", self.member_name),
                ("enum_pyx", self.enum_pyx),
                ("str_format", self.str_format),
                ("variable_names", self.variable_names),
                ("property_list", self.property_list),
            ],
        )
    }
}

/// Plain property: raw get, typed set, no validation beyond the type.
pub(crate) const PROP_TEMPLATE: &str = "\
    property $prop:
        def __get__(self):
            return self.$member_name.$prop
        def __set__(self, $typename x):
            self.$member_name.$prop = x
";

pub(crate) struct PropContext<'a> {
    pub prop: &'a str,
    pub typename: &'a str,
    pub member_name: &'a str,
}

impl PropContext<'_> {
    pub fn render(&self) -> String {
        substitute(
            PROP_TEMPLATE,
            &[
                ("prop", self.prop),
                ("typename", self.typename),
                ("member_name", self.member_name),
            ],
        )
    }
}

/// Enum property: get looks the symbolic name up by index in the named
/// list; set resolves a string through `.index()` or bounds-checks an
/// integer against the list length, raising inside the generated code.
pub(crate) const ENUM_PROP_TEMPLATE: &str = "\
    property $prop:
        def __get__(self):
            return self.${TYPE}_NAMES[<int> self.$member_name.$prop]
        def __set__(self, object x):
            cdef uint8_t i
            if isinstance(x, str):
                i = self.${TYPE}_NAMES.index(x)
            else:
                i = <uint8_t> x
                if i >= len(self.${TYPE}_NAMES):
                    raise ValueError(\"Can't understand value \" + str(i))
            self.$member_name.$prop = <$Type>(i)
";

pub(crate) struct EnumPropContext<'a> {
    pub prop: &'a str,
    pub enum_type: &'a str,
    pub member_name: &'a str,
}

impl EnumPropContext<'_> {
    pub fn render(&self) -> String {
        let upper = self.enum_type.to_uppercase();
        substitute(
            ENUM_PROP_TEMPLATE,
            &[
                ("prop", self.prop),
                ("Type", self.enum_type),
                ("TYPE", &upper),
                ("member_name", self.member_name),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_bare_and_braced() {
        let out = substitute(
            "self.${TYPE}_NAMES[$index]",
            &[("TYPE", "MODE"), ("index", "0")],
        );
        assert_eq!(out, "self.MODE_NAMES[0]");
    }

    #[test]
    fn test_substitute_unknown_is_literal() {
        assert_eq!(substitute("$unknown stays", &[]), "$unknown stays");
        assert_eq!(substitute("${unknown} stays", &[]), "${unknown} stays");
    }

    #[test]
    fn test_substitute_adjacent_text() {
        let out = substitute("_$classname(_Wrapper)", &[("classname", "Bar")]);
        assert_eq!(out, "_Bar(_Wrapper)");
    }

    #[test]
    fn test_prop_render() {
        let out = PropContext {
            prop: "count",
            typename: "int",
            member_name: "_instance",
        }
        .render();

        assert!(out.contains("property count:"));
        assert!(out.contains("return self._instance.count"));
        assert!(out.contains("def __set__(self, int x):"));
    }

    #[test]
    fn test_enum_prop_render() {
        let out = EnumPropContext {
            prop: "mode",
            enum_type: "Mode",
            member_name: "_instance",
        }
        .render();

        assert!(out.contains("return self.MODE_NAMES[<int> self._instance.mode]"));
        assert!(out.contains("i = self.MODE_NAMES.index(x)"));
        assert!(out.contains("if i >= len(self.MODE_NAMES):"));
        assert!(out.contains("self._instance.mode = <Mode>(i)"));
    }
}
