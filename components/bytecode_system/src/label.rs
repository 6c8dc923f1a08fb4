//! Branch labels and unique label generation

use std::fmt;

/// Branch target name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(pub String);

impl Label {
    /// Create a label with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Label name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates labels that are unique for the lifetime of the generator.
///
/// Every control-flow construct draws one id from a monotonic counter, so
/// nesting depth is unbounded.
///
/// # Example
///
/// ```
/// use bytecode_system::LabelGenerator;
///
/// let mut labels = LabelGenerator::new();
/// let (else_label, end_label) = labels.if_labels();
/// let (loop_label, exit_label) = labels.loop_labels();
///
/// assert_eq!(else_label.name(), "Else_0");
/// assert_eq!(end_label.name(), "EndIf_0");
/// assert_eq!(loop_label.name(), "Loop_1");
/// assert_eq!(exit_label.name(), "EndLoop_1");
/// ```
#[derive(Debug, Default)]
pub struct LabelGenerator {
    next_id: u64,
}

impl LabelGenerator {
    /// Create a new label generator
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh label with an arbitrary prefix
    pub fn fresh(&mut self, prefix: &str) -> Label {
        let id = self.next_id();
        Label(format!("{}_{}", prefix, id))
    }

    /// Else and end labels for one `if` statement
    pub fn if_labels(&mut self) -> (Label, Label) {
        let id = self.next_id();
        (
            Label(format!("Else_{}", id)),
            Label(format!("EndIf_{}", id)),
        )
    }

    /// Start and exit labels for one `while` loop
    pub fn loop_labels(&mut self) -> (Label, Label) {
        let id = self.next_id();
        (
            Label(format!("Loop_{}", id)),
            Label(format!("EndLoop_{}", id)),
        )
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_unique_across_many_constructs() {
        let mut labels = LabelGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let (a, b) = labels.if_labels();
            let (c, d) = labels.loop_labels();
            assert!(seen.insert(a));
            assert!(seen.insert(b));
            assert!(seen.insert(c));
            assert!(seen.insert(d));
        }
        assert_eq!(labels.issued(), 1000);
    }

    #[test]
    fn test_fresh_label() {
        let mut labels = LabelGenerator::new();
        assert_eq!(labels.fresh("Tmp").name(), "Tmp_0");
        assert_eq!(labels.fresh("Tmp").name(), "Tmp_1");
    }
}
