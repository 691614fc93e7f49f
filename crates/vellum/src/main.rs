use std::fmt::Write as _;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;
use vellum_errors::{Diagnostic, Renderer};
use vellum_parse::{ListKind, parse_source};
use vellum_tokenizer::text::token_range;
use vellum_tokenizer::{Source, TokenKind, Tokenizer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
enum Options {
    /// Print every token with its offset and raw text.
    Tokens { path: Utf8PathBuf },
    /// Print the component tree and any problems found.
    Tree { path: Utf8PathBuf },
    /// Report problems; exits with an error if there are any.
    Check { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Options::parse() {
        Options::Tokens { path } => {
            let text = read(&path)?;
            let source = open(&path, &text)?;
            print!("{}", dump_tokens(&source));
        }
        Options::Tree { path } => {
            let text = read(&path)?;
            let source = open(&path, &text)?;
            let parse = parse_source(source, ListKind::TopLevel)
                .with_context(|| format!("failed to parse `{path}`"))?;
            print!("{}", parse.tree.debug_dump(&source));
            report(&path, &text, &parse.diagnostics);
        }
        Options::Check { path } => {
            let text = read(&path)?;
            let parse = parse_source(open(&path, &text)?, ListKind::TopLevel)
                .with_context(|| format!("failed to parse `{path}`"))?;
            report(&path, &text, &parse.diagnostics);
            anyhow::ensure!(
                parse.diagnostics.is_empty(),
                "found {} problem(s) in `{path}`",
                parse.diagnostics.len()
            );
        }
    }
    Ok(())
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn open<'a>(path: &Utf8Path, text: &'a str) -> anyhow::Result<Source<'a>> {
    Source::new(text).with_context(|| format!("cannot tokenize `{path}`"))
}

fn dump_tokens(source: &Source<'_>) -> String {
    let mut buf = String::new();
    let mut tokenizer = Tokenizer::new(*source);
    loop {
        let token = tokenizer.next_token();
        if token.kind == TokenKind::EOF {
            break;
        }
        let range = token_range(source, token.start);
        _ = writeln!(buf, "{:?}@{range:?} {:?}", token.kind, &source.text()[range]);
    }
    buf
}

fn report(path: &Utf8Path, text: &str, diagnostics: &[Diagnostic]) {
    let renderer = Renderer::styled();
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, path.as_str(), text));
    }
}
