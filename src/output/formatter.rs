//! Output formatters for screens, notifications and saved search results

use crate::config::OutputFormat;
use crate::error::{PortalError, Result};
use crate::notify::{Notification, NotificationLevel};
use crate::screens::{SearchLayout, SearchScreen, SearchView, SubmitOutcome, SubmitView};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting the outcome of a search
pub trait SearchFormatter {
    fn format_search(&self, screen: &SearchScreen) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter emitting the result array as the service returned it
pub struct JsonFormatter {
    pretty: bool,
}

/// Standalone HTML page of result cards
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested output format
pub struct ViewRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Search: {{ query }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #1f2937;
            color: #e5e9f0;
            max-width: 42rem;
            margin: 0 auto;
            padding: 20px;
        }
        .banner {
            font-size: 0.875rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            font-weight: 600;
        }
        .card {
            border-radius: 12px;
            padding: 20px;
            margin: 16px 0;
            box-shadow: 0 2px 10px rgba(0,0,0,0.3);
        }
        .card h2 { margin: 0; }
        .chip {
            display: inline-block;
            background: rgba(59,130,246,0.6);
            font-size: 0.75rem;
            padding: 4px 12px;
            border-radius: 9999px;
            margin: 2px;
        }
        .download {
            display: inline-block;
            margin-top: 16px;
            background: #3b82f6;
            color: white;
            font-weight: bold;
            padding: 8px 16px;
            border-radius: 9999px;
            text-decoration: none;
        }
    </style>
    {% endif %}
</head>
<body>
    <h1>Search Resumes</h1>
    <p>Query: <strong>{{ query }}</strong></p>
    <p class="banner">{{ banner }}</p>
    {% for card in cards %}
    <div class="card" style="background-color: hsl(222, 23%, {{ card.lightness }}%)">
        <h2>{{ card.name }}</h2>
        <p>🔎 Final Score: <strong>{{ card.score }}</strong></p>
        {% if card.has_keywords %}
        <p>🧠 Common Keywords:</p>
        <div>
            {% for keyword in card.keywords %}<span class="chip">{{ keyword }}</span>{% endfor %}
        </div>
        {% endif %}
        {% if card.has_download %}
        <a class="download" href="{{ card.download_url }}" target="_blank" rel="noopener noreferrer">Download Resume</a>
        {% endif %}
    </div>
    {% endfor %}
    <p><small>Generated {{ generated_at }}</small></p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    query: String,
    banner: String,
    cards: Vec<HtmlCard>,
}

#[derive(Debug, Clone)]
struct HtmlCard {
    name: String,
    score: String,
    keywords: Vec<String>,
    has_keywords: bool,
    download_url: String,
    has_download: bool,
    lightness: u8,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    pub fn format_notification(&self, notification: &Notification) -> String {
        let (icon, color) = match notification.level {
            NotificationLevel::Success => ("✅", Color::Green),
            NotificationLevel::Error => ("❌", Color::Red),
            NotificationLevel::Alert => ("⚠️ ", Color::Yellow),
        };
        let stamp = notification.posted_at.format("%H:%M:%S").to_string();

        format!(
            "{} {} {}",
            self.colorize(&format!("[{}]", stamp), Color::BrightBlack),
            icon,
            self.colorize(&notification.message, color)
        )
    }

    pub fn format_submit(&self, view: &SubmitView) -> String {
        let mut output = self.format_header("Submit Resume", 2);

        output.push_str("Upload Resume (PDF only)\n");
        output.push_str(&format!("  📄 {}\n", view.file_label()));

        if view.uploading {
            output.push_str(&format!("  {}\n", self.colorize("⏳ Uploading...", Color::Yellow)));
        } else {
            output.push_str(&format!("  {}\n", self.colorize("[Upload]", Color::Blue)));
        }

        match &view.last_outcome {
            Some(SubmitOutcome::Succeeded(message)) => {
                output.push_str(&format!("  Last upload: {}\n", self.colorize(message, Color::Green)));
            }
            Some(SubmitOutcome::Rejected(message)) => {
                output.push_str(&format!("  Last upload: {}\n", self.colorize(message, Color::Red)));
            }
            Some(SubmitOutcome::Failed) => {
                output.push_str(&format!("  Last upload: {}\n", self.colorize("failed", Color::Red)));
            }
            Some(SubmitOutcome::NoFile) | Some(SubmitOutcome::Busy) | None => {}
        }

        output
    }

    pub fn format_search_view(&self, view: &SearchView) -> String {
        let mut output = self.format_header("Search Resumes", 2);

        let query = if view.query.is_empty() {
            self.colorize("3 years experience in React...", Color::BrightBlack)
        } else {
            view.query.clone()
        };
        output.push_str(&format!("  🔍 {}\n", query));

        if view.searching {
            output.push_str(&format!("  {}\n", self.colorize("⏳ Searching...", Color::Yellow)));
        } else {
            output.push_str(&format!("  {}\n", self.colorize("[Search]", Color::Blue)));
        }
        output.push_str(&format!("  {}\n", self.colorize("[Go to Submit]  :submit", Color::BrightBlack)));

        if view.layout == SearchLayout::Centered {
            return output;
        }

        if let Some(banner) = &view.banner {
            output.push_str(&format!("\n{}\n", self.colorize(&banner.to_uppercase(), Color::Cyan)));
        }

        for (index, card) in view.cards.iter().enumerate() {
            output.push_str(&format!(
                "\n┌ {}. {}\n",
                index + 1,
                if self.use_colors {
                    card.name.bold().to_string()
                } else {
                    card.name.clone()
                }
            ));
            output.push_str(&format!("│ 🔎 Final Score: {}\n", self.colorize(&card.score, Color::Green)));

            if !card.keywords.is_empty() {
                let chips = card
                    .keywords
                    .iter()
                    .map(|keyword| self.colorize(&format!("[{}]", keyword), Color::Blue))
                    .collect::<Vec<_>>()
                    .join(" ");
                output.push_str(&format!("│ 🧠 Common Keywords: {}\n", chips));
            }

            if let Some(url) = &card.download_url {
                output.push_str(&format!("│ ⬇️  Download Resume: {}\n", url));
            }
            output.push_str("└\n");
        }

        output
    }
}

impl SearchFormatter for ConsoleFormatter {
    fn format_search(&self, screen: &SearchScreen) -> Result<String> {
        Ok(self.format_search_view(&screen.view()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl SearchFormatter for JsonFormatter {
    fn format_search(&self, screen: &SearchScreen) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(screen.results())?)
        } else {
            Ok(serde_json::to_string(screen.results())?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, view: &SearchView) -> HtmlTemplate {
        let cards = view
            .cards
            .iter()
            .map(|card| HtmlCard {
                name: card.name.clone(),
                score: card.score.clone(),
                keywords: card.keywords.clone(),
                has_keywords: !card.keywords.is_empty(),
                download_url: card.download_url.clone().unwrap_or_default(),
                has_download: card.download_url.is_some(),
                lightness: card.lightness,
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            query: view.query.clone(),
            banner: view.banner.clone().unwrap_or_default(),
            cards,
        }
    }
}

impl SearchFormatter for HtmlFormatter {
    fn format_search(&self, screen: &SearchScreen) -> Result<String> {
        let template_data = self.create_template_data(&screen.view());
        template_data
            .render()
            .map_err(|e| PortalError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ViewRenderer {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }

    pub fn render_search(&self, screen: &SearchScreen, format: OutputFormat) -> Result<String> {
        let formatters: [&dyn SearchFormatter; 3] =
            [&self.console_formatter, &self.json_formatter, &self.html_formatter];

        formatters
            .into_iter()
            .find(|formatter| formatter.supports_format() == format)
            .ok_or_else(|| PortalError::OutputFormatting(format!("No formatter for {:?}", format)))?
            .format_search(screen)
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// A directory as save target gets a generated file name inside it.
pub fn resolve_save_path(path: &Path, format: OutputFormat, query: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, query, true))
    } else {
        path.to_path_buf()
    }
}

pub fn suggest_filename(format: OutputFormat, query: &str, timestamp: bool) -> String {
    let slug: String = query
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "search" } else { slug };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_results{}.txt", slug, timestamp_suffix),
        OutputFormat::Json => format!("{}_results{}.json", slug, timestamp_suffix),
        OutputFormat::Html => format!("{}_results{}.html", slug, timestamp_suffix),
    }
}
