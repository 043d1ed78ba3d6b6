#![forbid(unsafe_code)]

//! The displayable unit produced by view factories.
//!
//! Deliberately small: a text run, a stack of children, or nothing. Wrapper
//! layers nest existing views inside new ones rather than mutating them, so
//! a produced view is immutable evidence of what a render pass decided.

/// A displayable tree of content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Nothing to display.
    #[default]
    Empty,
    /// A run of text.
    Text(String),
    /// Children stacked in order.
    Stack(Vec<View>),
}

impl View {
    /// A text view.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// A stack of child views.
    #[must_use]
    pub fn stack(children: impl IntoIterator<Item = View>) -> Self {
        Self::Stack(children.into_iter().collect())
    }

    /// Whether this view displays nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Stack(children) => children.iter().all(Self::is_empty),
        }
    }

    /// All text content, concatenated in traversal order.
    #[must_use]
    pub fn flat_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(text) => out.push_str(text),
            Self::Stack(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
