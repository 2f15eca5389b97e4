//! Accessor class generation.
//!
//! Emits a small `Messages`-style Java class wrapping the bundle lookup.
//! A missing key returns the literal `!key!` instead of throwing, so the
//! caller always gets a displayable diagnostic.

use crate::tags;

/// Qualified bundle name for `ResourceBundle.getBundle`: the destination
/// package composed with the bundle's base name, or the base name alone
/// for the default package.
pub fn bundle_qualified_name(package: Option<&str>, base_name: &str) -> String {
    match package {
        Some(package) => format!("{package}.{base_name}"),
        None => base_name.to_string(),
    }
}

/// Generates the full source text of the accessor class.
///
/// The output is emitted pre-formatted; no formatter pass runs on it.
pub fn accessor_source(
    class_name: &str,
    package: Option<&str>,
    bundle_name: &str,
    ld: &str,
) -> String {
    let mut src = String::new();

    src.push_str(&format!("/*{ld} * Generated by propex. Do not edit.{ld} */{ld}"));
    if let Some(package) = package {
        src.push_str(&format!("package {package};{ld}"));
    }
    src.push_str(ld);
    src.push_str(&format!("import java.util.MissingResourceException;{ld}"));
    src.push_str(&format!("import java.util.ResourceBundle;{ld}"));
    src.push_str(ld);
    src.push_str(&format!("public class {class_name} {{{ld}"));
    src.push_str(ld);
    src.push_str(&format!(
        "\tprivate static final String RESOURCE_BUNDLE = \"{bundle_name}\"; {}{ld}",
        tags::tag_text(1)
    ));
    src.push_str(ld);
    src.push_str(&format!(
        "\tprivate static ResourceBundle fgResourceBundle = ResourceBundle.getBundle(RESOURCE_BUNDLE);{ld}"
    ));
    src.push_str(ld);
    src.push_str(&format!("\tprivate {class_name}() {{{ld}\t}}{ld}"));
    src.push_str(ld);
    src.push_str(&format!("\tpublic static String getString(String key) {{{ld}"));
    src.push_str(&format!("\t\ttry {{{ld}"));
    src.push_str(&format!("\t\t\treturn fgResourceBundle.getString(key);{ld}"));
    src.push_str(&format!("\t\t}} catch (MissingResourceException e) {{{ld}"));
    src.push_str(&format!("\t\t\treturn '!' + key + '!';{ld}"));
    src.push_str(&format!("\t\t}}{ld}"));
    src.push_str(&format!("\t}}{ld}"));
    src.push_str(&format!("}}{ld}"));
    src
}
