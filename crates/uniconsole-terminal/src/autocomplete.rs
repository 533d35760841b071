//! Incremental command-name completion.

use uniconsole_types::error::Result;

use crate::registry::{CommandRegistry, Snapshot};

/// Names matching a partial token and how far they agree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    /// Distinct matching names, in registration order.
    pub matches: Vec<String>,
    /// Length, in characters, of the prefix shared by every match.
    pub common_prefix_len: usize,
}

/// What the input box should do with a [`Completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// No command starts with the partial token.
    Nothing,
    /// Replace the token with this longer prefix and keep composing.
    Extend(String),
    /// The prefix cannot advance; show these names.
    Suggest(Vec<String>),
}

impl Completion {
    /// The shared prefix, spelled as in the first match.
    pub fn prefix(&self) -> &str {
        let Some(first) = self.matches.first() else {
            return "";
        };
        match first.char_indices().nth(self.common_prefix_len) {
            Some((byte, _)) => &first[..byte],
            None => first,
        }
    }

    /// Apply the completion contract to the token being typed.
    pub fn apply(&self, partial: &str) -> CompletionAction {
        if self.matches.is_empty() {
            return CompletionAction::Nothing;
        }
        if self.common_prefix_len > partial.chars().count() {
            CompletionAction::Extend(self.prefix().to_string())
        } else {
            CompletionAction::Suggest(self.matches.clone())
        }
    }
}

/// Complete `partial` against the registry's current snapshot.
pub fn complete(registry: &CommandRegistry, partial: &str) -> Result<Completion> {
    let snapshot = registry.snapshot()?;
    Ok(complete_in(&snapshot, partial))
}

/// Complete `partial` against a specific snapshot.
pub fn complete_in(snapshot: &Snapshot, partial: &str) -> Completion {
    let mut matches: Vec<String> = Vec::new();
    for desc in snapshot.lookup_by_prefix(partial) {
        let lower = desc.name().to_lowercase();
        if !matches.iter().any(|m| m.to_lowercase() == lower) {
            matches.push(desc.name().to_string());
        }
    }
    let common_prefix_len = common_prefix_len(&matches);
    Completion {
        matches,
        common_prefix_len,
    }
}

/// Longest prefix shared by all `names`, ignoring case, in characters.
///
/// Scans adjacent pairs for their first differing position and keeps the
/// minimum; a single name yields its own length.
pub fn common_prefix_len(names: &[String]) -> usize {
    let Some(first) = names.first() else {
        return 0;
    };
    let mut len = first.chars().count();
    for pair in names.windows(2) {
        let shared = pair[0]
            .chars()
            .zip(pair[1].chars())
            .take_while(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
            .count();
        len = len.min(shared);
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CommandCatalog;
    use crate::descriptor::CommandDescriptor;
    use crate::value::{TypeTag, Value};

    fn registry(names: &[&str]) -> CommandRegistry {
        let mut catalog = CommandCatalog::new();
        for (i, name) in names.iter().enumerate() {
            let mut b = CommandDescriptor::builder("S", *name);
            for _ in 0..i {
                b = b.param(TypeTag::Integer);
            }
            catalog.register(b.handler(|_| Ok(Value::Void)));
        }
        let reg = CommandRegistry::default();
        reg.rebuild(&catalog, false).unwrap();
        reg
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_match_is_full_length() {
        let reg = registry(&["ComplexCommand", "Add"]);
        let c = complete(&reg, "comp").unwrap();
        assert_eq!(c.matches, vec!["ComplexCommand"]);
        assert_eq!(c.common_prefix_len, "ComplexCommand".len());
        assert_eq!(
            c.apply("comp"),
            CompletionAction::Extend("ComplexCommand".into())
        );
    }

    #[test]
    fn no_match() {
        let reg = registry(&["Add"]);
        let c = complete(&reg, "zz").unwrap();
        assert!(c.matches.is_empty());
        assert_eq!(c.common_prefix_len, 0);
        assert_eq!(c.apply("zz"), CompletionAction::Nothing);
    }

    #[test]
    fn shared_prefix_extends() {
        let reg = registry(&["TestCommand", "TestCommand2", "Add"]);
        let c = complete(&reg, "t").unwrap();
        assert_eq!(c.matches, vec!["TestCommand", "TestCommand2"]);
        assert_eq!(c.common_prefix_len, 11);
        assert_eq!(c.apply("t"), CompletionAction::Extend("TestCommand".into()));
    }

    #[test]
    fn stalled_prefix_suggests() {
        let reg = registry(&["TestCommand", "TestCommand2"]);
        let c = complete(&reg, "testcommand").unwrap();
        assert_eq!(
            c.apply("testcommand"),
            CompletionAction::Suggest(strings(&["TestCommand", "TestCommand2"]))
        );
    }

    #[test]
    fn overloads_collapse() {
        let reg = registry(&["Add", "add", "Apply"]);
        let c = complete(&reg, "a").unwrap();
        assert_eq!(c.matches, vec!["Add", "Apply"]);
        assert_eq!(c.common_prefix_len, 1);
    }

    #[test]
    fn comparison_ignores_case() {
        assert_eq!(common_prefix_len(&strings(&["GetArray", "getarray2d"])), 8);
    }

    #[test]
    fn minimum_over_adjacent_pairs() {
        assert_eq!(common_prefix_len(&strings(&["abcd", "abcx", "abzz"])), 2);
        assert_eq!(common_prefix_len(&strings(&["abc", "ab"])), 2);
        assert_eq!(common_prefix_len(&[]), 0);
    }

    #[test]
    fn prefix_handles_multibyte() {
        let c = Completion {
            matches: strings(&["héllo", "hélp"]),
            common_prefix_len: 3,
        };
        assert_eq!(c.prefix(), "hél");
    }

    #[test]
    fn unbuilt_registry_fails() {
        let reg = CommandRegistry::default();
        assert!(complete(&reg, "a").is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn exact_single_match_is_full_length(name in "[a-zA-Z][a-zA-Z0-9]{0,12}") {
                let reg = registry(&[name.as_str()]);
                let c = complete(&reg, &name).unwrap();
                prop_assert_eq!(c.matches.len(), 1);
                prop_assert_eq!(c.common_prefix_len, name.chars().count());
            }

            #[test]
            fn prefix_is_shared_by_all(names in proptest::collection::vec("[a-c]{1,5}", 1..6)) {
                let len = common_prefix_len(&names);
                let head: String = names[0].chars().take(len).collect();
                for n in &names {
                    prop_assert!(n.starts_with(&head));
                }
            }
        }
    }
}
