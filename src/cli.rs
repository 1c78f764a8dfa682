use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use atty::Stream;
use clap::{Parser, Subcommand};
use lughat_rs::{
    HomeFeed, LexicalEntry, ListItem, Quote, Span, highlight, highlighted_citations, parse_detail,
    parse_home, parse_search,
};
use serde_json::json;
use termimad::{FmtText, MadSkin, terminal_size};

#[derive(Parser, Debug)]
#[command(
    name = "lughat-rs",
    about = "Normalize dictionary provider responses",
    version
)]
pub struct Cli {
    /// Emit JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a word-detail response.
    Detail {
        /// Path to the JSON body, or `-` for stdin.
        input: PathBuf,
    },
    /// Normalize a home-feed response.
    Home {
        /// Path to the JSON body, or `-` for stdin.
        input: PathBuf,
    },
    /// Normalize a search response.
    Search {
        /// Path to the JSON body, or `-` for stdin.
        input: PathBuf,
    },
    /// Emphasize a word inside a piece of text.
    Highlight {
        /// Text to scan.
        text: String,
        /// Reference word to emphasize.
        #[arg(short, long)]
        word: Option<String>,
    },
    /// Serve the normalizers over HTTP.
    #[cfg(feature = "web")]
    Serve {
        /// Socket address to bind.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: std::net::SocketAddr,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Command::Detail { input } => handle_detail(&input, cli.json),
        Command::Home { input } => handle_home(&input, cli.json),
        Command::Search { input } => handle_search(&input, cli.json),
        Command::Highlight { text, word } => handle_highlight(&text, word.as_deref(), cli.json),
        #[cfg(feature = "web")]
        Command::Serve { addr } => handle_serve(addr),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "web")]
fn handle_serve(addr: std::net::SocketAddr) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(lughat_rs::web::serve(lughat_rs::web::WebConfig { addr }))?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    fs::read_to_string(path).map_err(|err| format!("Failed to read {}: {err}", path.display()).into())
}

fn handle_detail(input: &Path, as_json: bool) -> Result<(), Box<dyn Error>> {
    let body = read_input(input)?;
    let entry = parse_detail(&body).map_err(|err| format!("{} ({err})", err.user_message()))?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        print_entry(&entry);
    }
    Ok(())
}

fn handle_home(input: &Path, as_json: bool) -> Result<(), Box<dyn Error>> {
    let feed = parse_home(&read_input(input)?)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        print_feed(&feed);
    }
    Ok(())
}

fn handle_search(input: &Path, as_json: bool) -> Result<(), Box<dyn Error>> {
    let items = parse_search(&read_input(input)?)?;
    if as_json {
        let payload = json!({ "count": items.len(), "results": items });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_search_table(&items);
    }
    Ok(())
}

fn handle_highlight(text: &str, word: Option<&str>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let spans = highlight(text, word);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&spans)?);
    } else {
        render_markdown_block("Highlighted", &spans_to_markdown(&spans));
    }
    Ok(())
}

fn print_entry(entry: &LexicalEntry) {
    println!(
        "{} / {} / {}",
        or_dash(&entry.forms.tertiary),
        or_dash(&entry.forms.secondary),
        or_dash(&entry.forms.primary)
    );
    println!("Origin: {}", entry.origin.as_deref().unwrap_or("Unknown"));
    if entry.audio.playable() {
        if let Some(url) = entry.audio.url.as_deref() {
            println!("Audio: {url}");
        }
    }

    for meaning in entry.meanings_by_language.values() {
        let pos = meaning
            .part_of_speech
            .as_deref()
            .map(|pos| format!(" ({pos})"))
            .unwrap_or_default();
        println!("\n{} Meaning{pos}:", meaning.title());
        for definition in &meaning.definitions {
            println!("- {definition}");
        }
    }

    if let Some(list) = format_list(&entry.synonyms, entry.synonyms.len()) {
        println!("\nSynonyms: {list}");
    }
    if let Some(list) = format_list(&entry.variants, entry.variants.len()) {
        println!("Variants: {list}");
    }

    if !entry.idioms.is_empty() {
        println!("\nIdioms:");
        for idiom in &entry.idioms {
            print_quote(idiom);
        }
    }

    if !entry.citations.is_empty() {
        let title = entry
            .citations
            .title
            .as_deref()
            .unwrap_or("Poetry Examples");
        let mut body = String::new();
        for (quote, spans) in entry.citations.items.iter().zip(highlighted_citations(entry)) {
            body.push_str("> ");
            body.push_str(&spans_to_markdown(&spans));
            body.push('\n');
            if let Some(poet) = quote.attribution.as_deref() {
                body.push_str(&format!("\n*{poet}*\n"));
            }
            body.push('\n');
        }
        render_markdown_block(title, &body);
    }

    if let Some(list) = format_list(entry.related_words_for_display(), entry.related_words.len()) {
        println!("\nRelated Words: {list}");
    }
}

fn print_quote(quote: &Quote) {
    match quote.attribution.as_deref() {
        Some(poet) => println!("- {} ({poet})", quote.text),
        None => println!("- {}", quote.text),
    }
}

fn print_feed(feed: &HomeFeed) {
    if let Some(word) = feed.word_of_the_day() {
        println!("Word of the Day: {} / {}", or_dash(&word.forms.tertiary), or_dash(&word.forms.primary));
        if !word.meaning.is_empty() {
            println!("  {}", word.meaning);
        }
    }
    if let Some(proverb) = feed.proverb_of_the_day() {
        println!("Proverb: {}", or_dash(proverb.display_text()));
        if !proverb.meaning.is_empty() {
            println!("  \"{}\"", proverb.meaning);
        }
    }
    let trending = feed.trending();
    if !trending.is_empty() {
        println!("\nTrending:");
        print_search_table(trending);
    }
}

fn print_search_table(rows: &[ListItem]) {
    if rows.is_empty() {
        println!("No matches found.");
        return;
    }
    let width = rows
        .iter()
        .map(|row| row.display_text().chars().count())
        .max()
        .unwrap_or(4)
        .max("WORD".len());
    println!("{:<width$}  {:<10}  {}", "WORD", "ID", "MEANING", width = width);
    println!("{:-<width$}  {:-<10}  {}", "", "", "-------", width = width);
    for row in rows {
        println!(
            "{:<width$}  {:<10}  {}",
            row.display_text(),
            row.id,
            or_dash(&row.meaning),
            width = width
        );
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn format_list(items: &[String], total: usize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut text = items.join(", ");
    if total > items.len() {
        text.push_str(", …");
    }
    Some(text)
}

fn spans_to_markdown(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.emphasized {
                format!("**{}**", span.text)
            } else {
                span.text.clone()
            }
        })
        .collect()
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

fn render_markdown_block(title: &str, body: &str) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return;
    }
    println!("\n{title}:");
    if stdout_is_tty() {
        let skin = MadSkin::default();
        let formatted = FmtText::from(&skin, trimmed, Some(markdown_width()));
        println!("{formatted}");
    } else {
        println!("{trimmed}");
    }
}
