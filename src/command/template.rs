//! # Command Lines and Templates
//!
//! Commands are argument vectors, never shell strings. A [`CommandTemplate`]
//! holds `{name}` placeholders inside individual arguments; rendering it
//! substitutes values into those arguments only, so a value can never split
//! into extra arguments or reach a shell parser.
//!
//! ```
//! use nft_tui::command::CommandTemplate;
//!
//! let template = CommandTemplate::new("nft", ["list", "set", "{family}", "{table}", "{set}"]);
//! let command = template.render(&[("family", "inet"), ("table", "filter"), ("set", "blacklist4")]);
//! assert_eq!(command.to_string(), "nft list set inet filter blacklist4");
//! ```

use std::fmt;

/// A program plus its argument vector, executed without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run `script` through `sh -c`. Only for fixed scripts: nothing
    /// user-supplied may be formatted into `script`.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", display_arg(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display only when it would be ambiguous unquoted.
fn display_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+{}".contains(c));
    if plain {
        arg.to_string()
    } else {
        shell_escape(arg)
    }
}

/// Escape a string for safe inclusion in a single-quoted shell argument.
///
/// Wraps the value in single quotes and escapes embedded single quotes with
/// the `'\''` idiom.
fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// A command whose arguments may contain `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Substitute `vars` into each argument.
    ///
    /// Placeholders without a value are left as they are and logged; the
    /// invoked tool then reports the bad argument on its own output.
    pub fn render(&self, vars: &[(&str, &str)]) -> CommandLine {
        let args = self
            .args
            .iter()
            .map(|arg| {
                let mut rendered = arg.clone();
                for (name, value) in vars {
                    rendered = rendered.replace(&format!("{{{name}}}"), value);
                }
                if let Some(name) = unfilled_placeholder(&rendered) {
                    tracing::warn!(
                        program = %self.program,
                        placeholder = name,
                        "command template rendered with an unfilled placeholder"
                    );
                }
                rendered
            })
            .collect();

        CommandLine {
            program: self.program.clone(),
            args,
        }
    }
}

/// Find the first `{identifier}` left in an argument. A lone `{` or `}` (as
/// used by nft element lists) is not a placeholder.
fn unfilled_placeholder(arg: &str) -> Option<&str> {
    let start = arg.find('{')?;
    let rest = &arg[start + 1..];
    let end = rest.find('}')?;
    let name = &rest[..end];
    let is_ident = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_ident {
        Some(name)
    } else {
        unfilled_placeholder(&rest[end + 1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_inside_single_arguments() {
        let template = CommandTemplate::new(
            "nft",
            ["add", "element", "{family}", "{table}", "{set}", "{", "{addr}", "}"],
        );
        let command = template.render(&[
            ("family", "inet"),
            ("table", "filter"),
            ("set", "blacklist4"),
            ("addr", "10.0.0.1"),
        ]);
        assert_eq!(command.program, "nft");
        assert_eq!(
            command.args,
            vec!["add", "element", "inet", "filter", "blacklist4", "{", "10.0.0.1", "}"]
        );
    }

    #[test]
    fn test_value_with_spaces_stays_one_argument() {
        let template = CommandTemplate::new("echo", ["{value}"]);
        let command = template.render(&[("value", "a b; rm -rf /")]);
        assert_eq!(command.args.len(), 1);
        assert_eq!(command.args[0], "a b; rm -rf /");
    }

    #[test]
    fn test_missing_value_leaves_placeholder() {
        let template = CommandTemplate::new("nft", ["list", "set", "{set}"]);
        let command = template.render(&[]);
        assert_eq!(command.args[2], "{set}");
    }

    #[test]
    fn test_unfilled_placeholder_ignores_lone_braces() {
        assert_eq!(unfilled_placeholder("{"), None);
        assert_eq!(unfilled_placeholder("}"), None);
        assert_eq!(unfilled_placeholder("{ }"), None);
        assert_eq!(unfilled_placeholder("x{set}"), Some("set"));
        assert_eq!(unfilled_placeholder("{ } {addr}"), Some("addr"));
    }

    #[test]
    fn test_display_quotes_only_when_needed() {
        let command = CommandLine::new("journalctl").args(["-k", "--no-pager", "-n", "300"]);
        assert_eq!(command.to_string(), "journalctl -k --no-pager -n 300");

        let command = CommandLine::shell("echo 'hi'");
        assert_eq!(command.to_string(), r#"sh -c 'echo '\''hi'\'''"#);
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("simple"), "'simple'");
        assert_eq!(shell_escape("it's"), "'it'\\''s'");
        assert_eq!(shell_escape(""), "''");
    }
}
