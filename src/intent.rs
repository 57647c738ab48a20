//! Invocation inputs
//!
//! Automation tools launch `lampctl` with the command in `lamp_cmd` and its
//! argument in `lamp_args`. Both may arrive as positional arguments or as
//! environment variables; positional arguments win.

/// Environment variables carrying the command, upper-case spelling first
pub const CMD_VARS: [&str; 2] = ["LAMP_CMD", "lamp_cmd"];

/// Environment variables carrying the argument
pub const ARGS_VARS: [&str; 2] = ["LAMP_ARGS", "lamp_args"];

/// Raw, unvalidated inputs for one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LampIntent {
    pub command: Option<String>,
    pub args: Option<String>,
}

impl LampIntent {
    pub fn new(command: Option<&str>, args: Option<&str>) -> Self {
        Self {
            command: command.map(String::from),
            args: args.map(String::from),
        }
    }

    /// Read the process arguments, falling back to the environment
    pub fn from_invocation() -> Self {
        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// `argv` excludes the program name. Everything after the command is
    /// joined with single spaces into the argument.
    pub fn from_sources<I, F>(argv: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut argv = argv.into_iter();
        if let Some(command) = argv.next() {
            let rest: Vec<String> = argv.collect();
            let args = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            return Self {
                command: Some(command),
                args,
            };
        }

        let first = |keys: &[&str]| keys.iter().find_map(|&key| lookup(key));
        Self {
            command: first(&CMD_VARS[..]),
            args: first(&ARGS_VARS[..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_positional_arguments() {
        let intent = LampIntent::from_sources(argv(&["timer", "1800"]), |_| None);
        assert_eq!(intent, LampIntent::new(Some("timer"), Some("1800")));

        let intent = LampIntent::from_sources(argv(&["mood", "slow", "fade"]), |_| None);
        assert_eq!(intent.args.as_deref(), Some("slow fade"));
    }

    #[test]
    fn test_positional_wins_over_environment() {
        let vars = env(&[("LAMP_CMD", "off")]);
        let intent = LampIntent::from_sources(argv(&["on"]), |k| vars.get(k).cloned());
        assert_eq!(intent, LampIntent::new(Some("on"), None));
    }

    #[test]
    fn test_environment_fallback() {
        let vars = env(&[("lamp_cmd", "blink"), ("LAMP_ARGS", "15")]);
        let intent = LampIntent::from_sources(Vec::new(), |k| vars.get(k).cloned());
        assert_eq!(intent, LampIntent::new(Some("blink"), Some("15")));
    }

    #[test]
    fn test_nothing_supplied() {
        let intent = LampIntent::from_sources(Vec::new(), |_| None);
        assert_eq!(intent, LampIntent::default());
    }
}
