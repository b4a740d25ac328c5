use serde::{Deserialize, Serialize};

/// The exam codes a user chose to display, in the order they were chosen.
///
/// An absent selection (never chosen) is modelled as `Option::None` by the
/// store; an empty `Selection` means the user deliberately chose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    codes: Vec<String>,
}

impl Selection {
    pub fn new(codes: Vec<String>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }
}
