//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use shared::domain::event::IndexedEvent;
use shared::submission::Banner;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&IndexedEvent> for EventRow {
    fn from(ev: &IndexedEvent) -> Self {
        Self {
            id: ev.id.clone(),
            name: ev.name.clone(),
            starts: ev
                .starts_at()
                .map(|at| at.format("%a, %b %-d, %Y %-I:%M %p").to_string())
                .unwrap_or_else(|| ev.event_timestamp.to_string()),
            image: ev.image_url.clone().unwrap_or_default(),
        }
    }
}

impl OutputFormat {
    pub fn print_json<T: Serialize + ?Sized>(&self, data: &T) {
        println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
    }

    pub fn print_events(&self, events: &[&IndexedEvent]) {
        match self {
            OutputFormat::Json => self.print_json(events),
            OutputFormat::Table if events.is_empty() => println!("No events found."),
            OutputFormat::Table => {
                println!("{}", Table::new(events.iter().map(|e| EventRow::from(*e))));
            }
        }
    }
}

/// Banner lines go to stderr so stdout only carries results.
pub fn print_banner(banner: &Banner) {
    match banner {
        Banner::Idle => {}
        Banner::Pending => eprintln!("Please wait..."),
        Banner::Success(msg) => eprintln!("[success] {msg}"),
        Banner::Failure(msg) => eprintln!("[failed] {msg}"),
    }
}
