use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use yadisk_api::types::{Disk, Resource};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct DiskRow {
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "Used")]
    #[serde(rename = "Used")]
    used: String,
    #[tabled(rename = "Free")]
    #[serde(rename = "Free")]
    free: String,
    #[tabled(rename = "Trash")]
    #[serde(rename = "Trash")]
    trash: String,
    #[tabled(rename = "Applications")]
    #[serde(rename = "Applications")]
    applications: String,
    #[tabled(rename = "Downloads")]
    #[serde(rename = "Downloads")]
    downloads: String,
}

#[derive(Tabled, Serialize)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    #[serde(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Path")]
    #[serde(rename = "Path")]
    path: String,
}

// -- Row builders --

fn build_disk_rows(disk: &Disk) -> Vec<DiskRow> {
    vec![DiskRow {
        total: format_size(disk.total_space),
        used: format_size(disk.used_space),
        free: format_size(disk.free_space()),
        trash: format_size(disk.trash_size),
        applications: disk.system_folders.applications.clone(),
        downloads: disk.system_folders.downloads.clone(),
    }]
}

fn build_resource_rows(resources: &[Resource]) -> Vec<ResourceRow> {
    resources
        .iter()
        .map(|r| ResourceRow {
            name: r.name.clone(),
            resource_type: r.resource_type.to_string(),
            size: if r.is_dir() {
                "-".to_string()
            } else {
                format_size(r.size)
            },
            modified: r.modified.format("%Y-%m-%d %H:%M").to_string(),
            path: r.path.clone(),
        })
        .collect()
}

// -- Table output --

pub fn print_disk_table(disk: &Disk) {
    println!("{}", Table::new(build_disk_rows(disk)));
}

pub fn print_resources_table(resources: &[Resource]) {
    println!("{}", Table::new(build_resource_rows(resources)));
}

// -- Markdown output --

pub fn print_disk_markdown(disk: &Disk) {
    let mut table = Table::new(build_disk_rows(disk));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_resources_markdown(resources: &[Resource]) {
    let mut table = Table::new(build_resource_rows(resources));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_disk_csv(disk: &Disk) -> Result<()> {
    write_csv(build_disk_rows(disk))
}

pub fn print_resources_csv(resources: &[Resource]) -> Result<()> {
    write_csv(build_resource_rows(resources))
}

fn write_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_size(bytes: u64) -> String {
    const GB: u64 = 1 << 30;
    const MB: u64 = 1 << 20;
    const KB: u64 = 1 << 10;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
