use anyhow::{anyhow, Result};
use clap::Args;
use yadisk_api::{Client, Context, PreviewSize, Query, ResourceQuery, ResourceSortBy, SortDirection};

use crate::output::{
    print_json, print_resources_csv, print_resources_markdown, print_resources_table, OutputFormat,
};

#[derive(Args)]
pub struct ResourceArgs {
    /// Path on the Disk, e.g. `/` or `disk:/Documents`
    pub path: String,

    /// Number of folder items to list
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of folder items to skip
    #[arg(long)]
    pub offset: Option<u64>,

    /// Sort field: name, path, created, modified, size
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Keep only these JSON keys in the response (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Preview size: S, M, L, XL, XXL, XXXL, or exact dimensions like 120x240
    #[arg(long)]
    pub preview_size: Option<String>,

    /// Crop the preview to the requested size
    #[arg(long)]
    pub preview_crop: bool,
}

pub async fn run(
    args: &ResourceArgs,
    client: &Client,
    ctx: &Context,
    format: &OutputFormat,
) -> Result<()> {
    let query = build_query(args)?;
    let reply = client.get_resource(ctx, &args.path, &query).await?;
    let resource = &reply.data;

    if let Some(listing) = &resource.embedded {
        eprintln!(
            "{} ({} of {} items, offset {})",
            listing.path,
            listing.items.len(),
            listing.total,
            listing.offset
        );
    }

    // Folders list their contents; files are shown as a single row.
    let rows = if resource.is_dir() {
        resource.items()
    } else {
        std::slice::from_ref(resource)
    };

    match format {
        OutputFormat::Table => print_resources_table(rows),
        OutputFormat::Json => print_json(resource),
        OutputFormat::Csv => print_resources_csv(rows)?,
        OutputFormat::Markdown => print_resources_markdown(rows),
    }

    Ok(())
}

fn build_query(args: &ResourceArgs) -> Result<ResourceQuery> {
    let mut query = ResourceQuery::default();

    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }
    if let Some(offset) = args.offset {
        query = query.with_offset(offset);
    }

    if let Some(sort) = &args.sort {
        let sort_by = sort
            .parse::<ResourceSortBy>()
            .map_err(|_| anyhow!("Unknown sort field: {}", sort))?;
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        query = query.with_sort(sort_by, direction);
    }

    for field in &args.fields {
        query = query.with_field(field);
    }

    if let Some(size) = &args.preview_size {
        let preview = match size.to_uppercase().as_str() {
            "S" => PreviewSize::S,
            "M" => PreviewSize::M,
            "L" => PreviewSize::L,
            "XL" => PreviewSize::XL,
            "XXL" => PreviewSize::XXL,
            "XXXL" => PreviewSize::XXXL,
            _ => PreviewSize::Exact(size.clone()),
        };
        query = query.with_preview_size(preview);
    }
    query = query.with_preview_crop(args.preview_crop);

    Ok(query)
}
