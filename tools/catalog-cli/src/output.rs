//! Output formatting for the CLI.

use std::time::Duration;

use catalog_service::ProviderMode;
use catalog_types::prelude::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = *width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for a pending catalog call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a page of products as a table, or JSON.
    pub fn products(&self, page: &PaginatedResponse<Product>) {
        if self.json {
            self.json(page);
            return;
        }
        if page.is_empty() {
            self.info("No products found");
            return;
        }

        let widths = [5, 32, 14, 9, 6];
        self.table_row(&["ID", "NAME", "PRICE", "CATEGORY", "STOCK"], &widths);
        for product in &page.data {
            self.table_row(
                &[
                    &product.id.to_string(),
                    &product.name,
                    &format_price(product.price),
                    &product.category.to_string(),
                    &product.stock.to_string(),
                ],
                &widths,
            );
        }
        println!("\n  {}", style(page_summary(page)).dim());
    }

    /// Print one product in detail.
    pub fn product(&self, product: &Product) {
        if self.json {
            self.json(product);
            return;
        }
        self.header(&product.name);
        self.kv("id", &product.id.to_string());
        self.kv("price", &format_price(product.price));
        self.kv("category", &product.category.to_string());
        self.kv("stock", &stock_badge(product.stock));
        if !product.description.is_empty() {
            self.kv("description", &product.description);
        }
        if let Some(image) = &product.image {
            self.kv("image", image);
        }
        self.kv("created", &product.created_at.to_rfc3339());
        self.kv("updated", &product.updated_at.to_rfc3339());
    }

    pub fn categories(&self, categories: &[Category]) {
        if self.json {
            self.json(&categories);
            return;
        }
        let widths = [5, 20, 40];
        self.table_row(&["ID", "NAME", "DESCRIPTION"], &widths);
        for category in categories {
            self.table_row(
                &[
                    &category.id.to_string(),
                    &category.name,
                    category.description.as_deref().unwrap_or(""),
                ],
                &widths,
            );
        }
    }
}

/// Footer line for a page of results.
pub fn page_summary<T>(page: &PaginatedResponse<T>) -> String {
    let mut summary = format!(
        "page {} of {} · {} total · {} per page",
        page.page, page.total_pages, page.total, page.limit
    );
    match (page.has_prev(), page.has_next()) {
        (true, true) => summary.push_str(" · more before and after"),
        (false, true) => summary.push_str(" · more available"),
        (true, false) => summary.push_str(" · last page"),
        (false, false) => {}
    }
    summary
}

/// Format a price with thousands separators.
pub fn format_price(price: Price) -> String {
    let units = price.cents() / 100;
    let cents = price.cents() % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if cents == 0 {
        format!("${}", grouped)
    } else {
        format!("${}.{:02}", grouped, cents)
    }
}

/// Stock level, colored by availability.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("out of stock").red().to_string(),
        1..=5 => style(format!("{} (low)", stock)).yellow().to_string(),
        _ => style(stock).green().to_string(),
    }
}

pub fn mode_badge(mode: ProviderMode) -> String {
    match mode {
        ProviderMode::Mock => style(mode).yellow().to_string(),
        ProviderMode::Remote => style(mode).cyan().to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
