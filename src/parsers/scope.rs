use std::borrow::Cow;

/// Lexical nesting of class and function names, outermost first.
///
/// A scope is never mutated while walking: entering a definition produces a
/// new scope for its body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    names: Vec<String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_module_level(&self) -> bool {
        self.names.is_empty()
    }

    /// Qualified name of `name` defined in this scope
    pub fn qualify(&self, name: &str) -> String {
        if self.is_module_level() {
            name.to_string()
        } else {
            format!("{}.{}", self.names.join("."), name)
        }
    }

    /// Id of the innermost container, or `file_id` at module level
    pub fn owner<'a>(&self, file_id: &'a str) -> Cow<'a, str> {
        if self.is_module_level() {
            Cow::Borrowed(file_id)
        } else {
            Cow::Owned(self.names.join("."))
        }
    }

    pub fn enter(&self, name: &str) -> Scope {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.extend(self.names.iter().cloned());
        names.push(name.to_string());
        Scope { names }
    }
}
