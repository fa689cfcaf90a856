use lintfix_catalog::Variables;

/// Replace every `{{name}}` in `template` with the bound value of `name`.
///
/// Placeholders without a binding are left in place; see [`has_placeholder`].
pub fn substitute(template: &str, vars: &Variables) -> String {
    let mut out = template.to_string();
    for (name, value) in vars.iter() {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

/// True if `text` still carries placeholder syntax.
pub fn has_placeholder(text: &str) -> bool {
    text.contains("{{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let vars: Variables = [("X", "foo")].into_iter().collect();
        assert_eq!(substitute("{{X}} + {{X}}", &vars), "foo + foo");
    }

    #[test]
    fn unbound_placeholder_survives() {
        let vars: Variables = [("X", "foo")].into_iter().collect();
        let out = substitute("{{X}} {{Y}}", &vars);
        assert_eq!(out, "foo {{Y}}");
        assert!(has_placeholder(&out));
    }

    #[test]
    fn plain_text_is_untouched() {
        let out = substitute("  def  x", &Variables::default());
        assert_eq!(out, "  def  x");
        assert!(!has_placeholder(&out));
    }
}
