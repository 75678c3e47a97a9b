//! Lesson listing.

use serde::Serialize;

use prepdeck_core::catalog::{Catalog, Topic};

use super::load_site;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::PrepdeckError;

#[derive(Serialize)]
struct TopicListing<'a> {
    id: &'a str,
    name: &'a str,
    lessons: Vec<LessonListing<'a>>,
}

#[derive(Serialize)]
struct LessonListing<'a> {
    id: &'a str,
    title: &'a str,
    subtopic: &'a str,
    path: String,
}

/// Execute `list`.
///
/// Files that fail to load are logged and left out.
///
/// # Errors
///
/// Returns an error if the content tree cannot be read.
pub fn run(args: &ListArgs) -> Result<(), PrepdeckError> {
    let site = load_site(&args.source)?;
    let catalog = Catalog::discover(&args.source.content, &site)?;

    match args.format {
        OutputFormat::Human => print_human(&catalog),
        OutputFormat::Json => {
            let listing: Vec<TopicListing<'_>> = catalog.topics.iter().map(listing).collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}

fn listing(topic: &Topic) -> TopicListing<'_> {
    TopicListing {
        id: &topic.id,
        name: &topic.name,
        lessons: topic
            .lessons
            .iter()
            .map(|entry| LessonListing {
                id: &entry.lesson.id,
                title: &entry.lesson.metadata.title,
                subtopic: &entry.lesson.heading.subtopic,
                path: entry.path.display().to_string(),
            })
            .collect(),
    }
}

fn print_human(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("No lessons found.");
        return;
    }
    for topic in &catalog.topics {
        println!("{} ({})", topic.name, topic.id);
        for entry in &topic.lessons {
            println!("  {:<40} {}", entry.lesson.heading.subtopic, entry.lesson.id);
        }
    }
}
