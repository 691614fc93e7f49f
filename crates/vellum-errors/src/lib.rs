use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A recoverable problem found while parsing. Parsing always goes on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_snippet() {
        let text = "a { color: red\n";
        let diagnostic = Diagnostic::error("unterminated block", TextRange::new(2.into(), 3.into()));
        let rendered = diagnostic.render(&Renderer::plain(), "style.css", text).to_string();
        assert!(rendered.contains("error: unterminated block"), "{rendered}");
        assert!(rendered.contains("style.css"), "{rendered}");
        assert!(rendered.contains("here"), "{rendered}");
    }
}
