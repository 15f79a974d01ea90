//! Argument validation: checks the positional words (command name first) against
//! each command's arity before anything is dispatched.

use super::command::Command;

/// A validated command plus its (unmodified) argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub argument: Option<String>,
}

/// True only when a known command is present and the trailing word count
/// matches its arity.
pub fn validate_arguments(words: &[String]) -> bool {
    let Some((name, trailing)) = words.split_first() else {
        return false;
    };
    Command::from_name(name).is_some_and(|c| c.arity().accepts(trailing.len()))
}

pub fn parse_invocation(words: &[String]) -> Option<Invocation> {
    if !validate_arguments(words) {
        return None;
    }
    let (name, trailing) = words.split_first()?;
    Some(Invocation {
        command: Command::from_name(name)?,
        argument: trailing.first().cloned(),
    })
}
