use anyhow::Result;
use yadisk_api::{Client, Context};

use crate::output::{print_disk_csv, print_disk_markdown, print_disk_table, print_json, OutputFormat};

pub async fn run(client: &Client, ctx: &Context, format: &OutputFormat) -> Result<()> {
    let reply = client.get_disk(ctx).await?;
    let disk = &reply.data;

    match format {
        OutputFormat::Table => print_disk_table(disk),
        OutputFormat::Json => print_json(disk),
        OutputFormat::Csv => print_disk_csv(disk)?,
        OutputFormat::Markdown => print_disk_markdown(disk),
    }

    Ok(())
}
