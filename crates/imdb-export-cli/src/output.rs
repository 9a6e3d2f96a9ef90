use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use media_sync_models::{ImdbItem, ImdbList};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "success", "message": msg.as_ref() }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "warning", "message": msg.as_ref() }));
            }
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "info", "message": msg.as_ref() }));
            }
        }
    }

    /// Data payloads are printed even in quiet mode; they are the point of the command.
    pub fn json(&self, data: &serde_json::Value) {
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            OutputFormat::Human => println!("{}", data),
        }
    }

    pub fn list(&self, list: &ImdbList) {
        match self.format {
            OutputFormat::Human => {
                let kind = if list.is_watchlist { "watchlist" } else { "list" };
                println!(
                    "{} {} ({}, slug {}, {} items)",
                    list.list_name.bold(),
                    list.list_id.dimmed(),
                    kind,
                    list.slug.cyan(),
                    list.items.len()
                );
                println!("{}", items_table(&list.items));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(list).unwrap_or_default());
            }
        }
    }

    pub fn lists(&self, lists: &[ImdbList]) {
        match self.format {
            OutputFormat::Human => {
                if lists.is_empty() {
                    println!("No lists found");
                    return;
                }
                println!("{}", lists_table(lists));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(lists).unwrap_or_default());
            }
        }
    }

    pub fn ratings(&self, ratings: &[ImdbItem]) {
        match self.format {
            OutputFormat::Human => println!("{}", items_table(ratings)),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(ratings).unwrap_or_default());
            }
        }
    }
}

fn lists_table(lists: &[ImdbList]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Name", "Slug", "Items"]);
    for list in lists {
        table.add_row(vec![
            list.list_id.clone(),
            list.list_name.clone(),
            list.slug.clone(),
            list.items.len().to_string(),
        ]);
    }
    table
}

fn items_table(items: &[ImdbItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["IMDb ID", "Title Type", "Rating", "Rated On"]);
    for item in items {
        table.add_row(vec![
            item.id.clone(),
            item.title_type.clone(),
            item.rating().map(|r| r.to_string()).unwrap_or_default(),
            item.rating_date().map(|d| d.to_string()).unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_table_has_row_per_list() {
        let lists = vec![
            ImdbList {
                list_id: "ls1".to_string(),
                list_name: "Sci-Fi Favorites 2024".to_string(),
                slug: "sci-fi-favorites-2024".to_string(),
                items: vec![ImdbItem::new("tt0083658", "Movie")],
                is_watchlist: false,
            },
            ImdbList {
                list_id: "ls2".to_string(),
                list_name: "Empty".to_string(),
                slug: "empty".to_string(),
                items: Vec::new(),
                is_watchlist: false,
            },
        ];
        let rendered = lists_table(&lists).to_string();
        assert!(rendered.contains("sci-fi-favorites-2024"));
        assert!(rendered.contains("ls2"));
    }
}
