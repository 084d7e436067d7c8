use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use kupu_vocab::{Segment, VocabularyIndex, annotate};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let vocab_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p kupu-vocab --example annotate -- <vocab.json> <text...>")?;
    let text = args.collect::<Vec<_>>().join(" ");

    let index = VocabularyIndex::load_from_file(&vocab_path)
        .with_context(|| format!("loading vocabulary from {}", vocab_path.display()))?;

    println!("Vocabulary: {} ({} entries)", vocab_path.display(), index.len());
    println!("Text      : {text}");
    for segment in annotate(&text, &index) {
        match segment {
            Segment::Tagged {
                text,
                matched_text,
                entry,
            } => println!(
                "  [{text}] -> {} = {} ({})",
                matched_text,
                entry.translation(),
                entry.id()
            ),
            Segment::Literal { text, kind } => println!("  {text:?} {kind:?}"),
        }
    }

    Ok(())
}
