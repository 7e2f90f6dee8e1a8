//! Command execution
//!
//! Every command writes to a caller-supplied writer so the binary can use
//! stdout and tests can use a buffer.

use anyhow::{Context, Result};
use notes_core::{ContentStore, JsonSource, TopicNotes, document_schema};
use std::io::Write;
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::config::Config;

const SUGGESTION_LIMIT: usize = 3;

/// Runs `cli` against the content selected by the flags or the configuration.
pub async fn execute(cli: Cli, config: &Config, out: &mut dyn Write) -> Result<()> {
    if cli.command == Command::Schema {
        return write_schema(out);
    }

    let content_path = cli.content.unwrap_or_else(|| config.content_path.clone());
    let source = JsonSource::new(&content_path);
    let store = ContentStore::from_source(&source)
        .await
        .with_context(|| format!("Failed to load content from '{}'", content_path.display()))?;

    run(&cli.command, &store, out)
}

/// Runs a query command against an already loaded store.
pub fn run(command: &Command, store: &ContentStore, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Check => {
            let stats = store.stats();
            info!(?stats, "Content is valid");
            writeln!(
                out,
                "OK: {} topics, {} sections, {} worked examples ({} steps), {} sections with video",
                stats.topics,
                stats.sections,
                stats.worked_examples,
                stats.steps,
                stats.sections_with_video
            )?;
        }
        Command::List { subject } => {
            let keys: Vec<&str> = match subject {
                Some(subject) => store.topics_for_subject(subject).collect(),
                None => store.list_topics().collect(),
            };
            for key in keys {
                writeln!(out, "{}", key)?;
            }
        }
        Command::Show { key, json } => {
            let notes = match store.get_topic(key) {
                Ok(notes) => notes,
                Err(err) => {
                    warn!(key = %key, "Topic lookup missed");
                    let suggestions = store.suggest(key, SUGGESTION_LIMIT);
                    if !suggestions.is_empty() {
                        writeln!(out, "Did you mean:")?;
                        for suggestion in suggestions {
                            writeln!(out, "  {}", suggestion)?;
                        }
                    }
                    return Err(err.into());
                }
            };
            if *json {
                serde_json::to_writer_pretty(&mut *out, notes)?;
                writeln!(out)?;
            } else {
                render_topic(notes, out)?;
            }
        }
        Command::Search { needle } => {
            let hits = store.search_entries(needle);
            info!(needle = %needle, hits = hits.len(), "Search finished");
            for (key, _) in hits {
                writeln!(out, "{}", key)?;
            }
        }
        Command::Schema => write_schema(out)?,
    }
    Ok(())
}

/// Prints the JSON Schema of a content document. Needs no loaded content.
fn write_schema(out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &document_schema())?;
    writeln!(out)?;
    Ok(())
}

/// Plain-text rendering. Markdown and LaTeX are printed as authored.
fn render_topic(notes: &TopicNotes, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "# {}", notes.topic)?;
    writeln!(out, "{} | {}", notes.subject, notes.grade_level)?;
    writeln!(out)?;
    writeln!(out, "{}", notes.summary)?;

    for (i, section) in notes.sections.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "## {}. {}", i + 1, section.title)?;
        if let Some(url) = &section.video_url {
            writeln!(out, "Video: {}", url)?;
        }
        writeln!(out, "{}", section.content)?;

        for (n, example) in section.worked_examples.iter().flatten().enumerate() {
            writeln!(out)?;
            writeln!(out, "Example {}: {}", n + 1, example.question)?;
            for (s, step) in example.steps.iter().enumerate() {
                writeln!(out, "  {}) {}", s + 1, step)?;
            }
            writeln!(out, "  Answer: {}", example.final_answer)?;
        }
    }

    for (heading, items) in [
        ("Key points", &notes.key_points),
        ("Exam tips", &notes.exam_tips),
        ("Diagrams", &notes.visual_descriptions),
    ] {
        if items.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}:", heading)?;
        for item in items {
            writeln!(out, "- {}", item)?;
        }
    }
    Ok(())
}
