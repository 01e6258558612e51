use url::Url;
use yadisk_api::{PreviewSize, Query, ResourceQuery, ResourceSortBy, SortDirection};

fn base_url() -> Url {
    Url::parse("https://example.com/v1/disk/resources/?path=disk%3A%2F").unwrap()
}

#[test]
fn resource_query_defaults_add_nothing() {
    let url = ResourceQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("path=disk%3A%2F"));
}

#[test]
fn resource_query_paging() {
    let url = ResourceQuery::default()
        .with_limit(50)
        .with_offset(100)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("limit=50"));
    assert!(query.contains("offset=100"));
}

#[test]
fn resource_query_sort_direction() {
    let url = ResourceQuery::default()
        .with_sort(ResourceSortBy::Name, SortDirection::Asc)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("sort=name"));

    let url = ResourceQuery::default()
        .with_sort(ResourceSortBy::Modified, SortDirection::Desc)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("sort=-modified"));
}

#[test]
fn resource_query_fields_are_comma_joined() {
    let url = ResourceQuery::default()
        .with_field("name")
        .with_fields(&["_embedded.items.path", "size"])
        .add_to_url(&base_url());
    let fields = url
        .query_pairs()
        .find(|(k, _)| k == "fields")
        .map(|(_, v)| v.into_owned());
    assert_eq!(fields.as_deref(), Some("name,_embedded.items.path,size"));
}

#[test]
fn resource_query_preview() {
    let url = ResourceQuery::default()
        .with_preview_size(PreviewSize::XL)
        .with_preview_crop(true)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("preview_size=XL"));
    assert!(query.contains("preview_crop=true"));

    let url = ResourceQuery::default()
        .with_preview_size(PreviewSize::Exact("120x240".to_string()))
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("preview_size=120x240"));
}

#[test]
fn sort_keys_parse_from_strings() {
    assert_eq!("size".parse::<ResourceSortBy>(), Ok(ResourceSortBy::Size));
    assert_eq!("created".parse::<ResourceSortBy>(), Ok(ResourceSortBy::Created));
    assert!("owner".parse::<ResourceSortBy>().is_err());
    assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
}
