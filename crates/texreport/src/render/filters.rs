//! MiniJinja filter registration.

use minijinja::{Environment, Value};

/// Escapes characters that have special meaning in LaTeX text.
///
/// ```rust
/// use texreport::escape_latex;
///
/// assert_eq!(escape_latex("50% of R&D"), r"50\% of R\&D");
/// assert_eq!(escape_latex("a_b^c"), r"a\_b\textasciicircum{}c");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' | '}' | '#' | '$' | '%' | '&' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '^' => out.push_str(r"\textasciicircum{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Registers the LaTeX filters on a minijinja environment.
pub(crate) fn register_filters(env: &mut Environment<'static>) {
    // User text into LaTeX: {{ metadata.title | tex }}
    env.add_filter("tex", |value: Value| -> String { escape_latex(&value.to_string()) });

    // Wraps a value in a brace group so templates can write
    // \title{{ title | tex | arg }} without fighting the delimiters.
    env.add_filter("arg", |value: Value| -> String { format!("{{{}}}", value) });
}
