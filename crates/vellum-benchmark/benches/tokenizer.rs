use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use vellum_tokenizer::{Source, TokenKind, Tokenizer};

static DECLARATIONS: &str = "
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
a.nav > li:hover { color: #ff0; margin: -1.5em 0 2px calc(100% - 3rem); }
";

static STRINGS_AND_URLS: &str = r#"
@import url(theme.css); @font-face { src: url("font.woff2") format('woff2'); }
@import url(theme.css); @font-face { src: url("font.woff2") format('woff2'); }
@import url(theme.css); @font-face { src: url("font.woff2") format('woff2'); }
@import url(theme.css); @font-face { src: url("font.woff2") format('woff2'); }
@import url(theme.css); @font-face { src: url("font.woff2") format('woff2'); }
/* escaped */ .\31 0 { content: "\201C" } /* and */ /* more */
/* escaped */ .\31 0 { content: "\201C" } /* and */ /* more */
/* escaped */ .\31 0 { content: "\201C" } /* and */ /* more */
"#;

static CANDIDATES: [(&str, &str); 2] =
    [("declarations", DECLARATIONS), ("strings_urls_and_escapes", STRINGS_AND_URLS)];

fn iterate(s: &str) {
    let Ok(source) = Source::new(s) else { return };
    let mut tokenizer = Tokenizer::new(source);

    loop {
        let token = tokenizer.next_token();
        if token.kind == TokenKind::EOF {
            break;
        }
        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
