use vellum_errors::Diagnostic;
use vellum_skip_tree::TreeError;
use vellum_syntax::ComponentTree;
use vellum_tokenizer::{Source, SourceError};

mod parser;

/// Where a rule list sits. CDO and CDC are only skipped at the top level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    TopLevel,
    Nested,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A component tree with the recoverable problems found while building it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    pub tree: ComponentTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses a whole style sheet.
pub fn parse_stylesheet(text: &str) -> Result<Parse, Error> {
    parse_source(Source::new(text)?, ListKind::TopLevel)
}

/// Parses a list of rules found inside a block, such as the body of `@media`.
pub fn parse_rule_list(text: &str) -> Result<Parse, Error> {
    parse_source(Source::new(text)?, ListKind::Nested)
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.text().len(), kind = ?kind))]
pub fn parse_source(source: Source<'_>, kind: ListKind) -> Result<Parse, Error> {
    let parse = parser::Parser::new(source).run(kind)?;
    tracing::debug!(
        components = parse.tree.size(),
        diagnostics = parse.diagnostics.len(),
        "parsed rule list"
    );
    Ok(parse)
}
