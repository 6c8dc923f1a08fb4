//! Type descriptors
//!
//! Translates source-level type names (`Integer`, `Array[Integer]`, class
//! names) into the compact descriptor strings used in instruction operands.

/// Descriptor of a source type name.
///
/// `Array[T]` maps to `[` followed by the element descriptor; the top types
/// map to `java/lang/Object`; other names map to an object descriptor built
/// from the name.
///
/// # Example
///
/// ```
/// use bytecode_system::descriptor_for;
///
/// assert_eq!(descriptor_for("Integer"), "LInteger;");
/// assert_eq!(descriptor_for("Real"), "D");
/// assert_eq!(descriptor_for("Array[Integer]"), "[LInteger;");
/// assert_eq!(descriptor_for("Point"), "LPoint;");
/// ```
pub fn descriptor_for(type_name: &str) -> String {
    match type_name {
        "Integer" => "LInteger;".to_string(),
        "String" => "Ljava/lang/String;".to_string(),
        "Real" => "D".to_string(),
        "Boolean" => "LBoolean;".to_string(),
        "Void" => "V".to_string(),
        "AnyRef" | "AnyValue" => "Ljava/lang/Object;".to_string(),
        other => match array_element(other) {
            Some(element) => format!("[{}", descriptor_for(element)),
            // Parameterized named types erase to their base class.
            None => match other.split_once('[') {
                Some((base, _)) => descriptor_for(base),
                None => format!("L{};", other),
            },
        },
    }
}

/// Element type name of `Array[T]`, if `type_name` is an array type
pub fn array_element(type_name: &str) -> Option<&str> {
    type_name
        .strip_prefix("Array[")
        .and_then(|rest| rest.strip_suffix(']'))
}

/// Internal class name for a reference descriptor (`LFoo;` → `Foo`)
pub fn internal_name(descriptor: &str) -> Option<&str> {
    descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
}

/// Method descriptor from parameter type names and a return type name.
///
/// `None` as the return type denotes a void method.
pub fn method_descriptor<S: AsRef<str>>(parameters: &[S], return_type: Option<&str>) -> String {
    let params: String = parameters
        .iter()
        .map(|p| descriptor_for(p.as_ref()))
        .collect();
    let ret = return_type.map(descriptor_for).unwrap_or_else(|| "V".to_string());
    format!("({}){}", params, ret)
}

/// Number of local slots (and stack words) a value of this descriptor
/// occupies.
pub fn slot_width(descriptor: &str) -> u16 {
    match descriptor {
        "D" | "J" => 2,
        "V" => 0,
        _ => 1,
    }
}
