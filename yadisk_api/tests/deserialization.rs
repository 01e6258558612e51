use chrono::{TimeZone, Utc};
use yadisk_api::types::{Disk, Resource, ResourceType, SystemFolders};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_disk() {
    let json = load_fixture("disk.json");
    let disk: Disk = serde_json::from_str(&json).unwrap();
    assert_eq!(
        disk,
        Disk {
            trash_size: 4631577437,
            total_space: 319975063552,
            used_space: 26157681270,
            system_folders: SystemFolders {
                applications: "disk:/Applications".to_string(),
                downloads: "disk:/Downloads/".to_string(),
            },
        }
    );
    assert_eq!(disk.free_space(), 319975063552 - 26157681270);
}

#[test]
fn deserialize_file_resource() {
    let json = load_fixture("resource_file.json");
    let resource: Resource = serde_json::from_str(&json).unwrap();

    assert!(resource.public_key.is_none());
    assert!(resource.embedded.is_none());
    assert!(resource.custom_properties.is_none());
    assert!(resource.public_url.is_none());
    assert!(resource.origin_path.is_none());
    assert_eq!(resource.name, "Горы.jpg");
    assert_eq!(
        resource.created,
        Utc.with_ymd_and_hms(2017, 2, 26, 9, 4, 44).unwrap()
    );
    assert_eq!(
        resource.modified,
        Utc.with_ymd_and_hms(2017, 2, 26, 9, 24, 44).unwrap()
    );
    assert_eq!(resource.path, "disk:/Горы.jpg");
    assert_eq!(
        resource.md5.as_deref(),
        Some("1392851f0668017168ee4b5a59d66e7b")
    );
    assert_eq!(
        resource.sha256.as_deref(),
        Some("d69e72661e26d9f1d44ab12e59c6cebfde48c125299db7768c913cfb5e42dffd")
    );
    assert_eq!(resource.revision, Some(1488099884247936));
    assert_eq!(
        resource.resource_id.as_deref(),
        Some("471259284:a1b980b1e83355ec15e8d0cc7fdaa9a34020b252de9c38c9ec4279af50823a13")
    );
    assert_eq!(resource.resource_type, ResourceType::File);
    assert_eq!(resource.media_type.as_deref(), Some("image"));
    assert_eq!(resource.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(resource.size, 1762478);
    assert!(!resource.is_dir());
    assert!(resource.items().is_empty());
}

#[test]
fn deserialize_folder_with_listing() {
    let json = load_fixture("resource_dir.json");
    let resource: Resource = serde_json::from_str(&json).unwrap();

    assert!(resource.is_dir());
    assert_eq!(resource.size, 0);
    assert!(resource.md5.is_none());

    let listing = resource.embedded.as_ref().unwrap();
    assert_eq!(listing.sort, "name");
    assert_eq!(listing.path, "disk:/");
    assert_eq!(listing.limit, 20);
    assert_eq!(listing.offset, 0);
    assert_eq!(listing.total, 2);

    let items = resource.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].resource_type, ResourceType::Dir);
    assert_eq!(items[1].name, "notes.txt");
    assert_eq!(items[1].size, 43);
    assert_eq!(
        items[1].modified,
        Utc.with_ymd_and_hms(2017, 3, 2, 8, 30, 0).unwrap()
    );
    let props = items[1].custom_properties.as_ref().unwrap();
    assert_eq!(props.get("color").map(String::as_str), Some("green"));
}

#[test]
fn deserialize_published_trash_resource() {
    let json = load_fixture("resource_public.json");
    let resource: Resource = serde_json::from_str(&json).unwrap();

    assert_eq!(
        resource.public_key.as_deref(),
        Some("Mw0v4uIjU4uTpXmHfAMvYcGDhLzyyhAK8uTEY2Ps9vs=")
    );
    assert_eq!(
        resource.public_url.as_deref(),
        Some("https://yadi.sk/d/2AEJCiNTZM9uUb")
    );
    assert_eq!(resource.origin_path.as_deref(), Some("disk:/Work/report.pdf"));
    assert!(resource.path.starts_with("trash:/"));
}

#[test]
fn resource_type_rejects_unknown_values() {
    let result = serde_json::from_str::<ResourceType>(r#""symlink""#);
    assert!(result.is_err());
    assert_eq!(ResourceType::Dir.to_string(), "dir");
}
