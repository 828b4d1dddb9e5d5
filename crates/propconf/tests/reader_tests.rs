//! Loading and lookup through `Configuration`

use std::sync::Arc;

use pretty_assertions::assert_eq;
use propconf::{
    Configurable, Configuration, Error, LoadMode, MemoryObjectStore, RemoteOptions, SearchPath,
};
use propconf_test_utils::fixture::TestDir;
use propconf_test_utils::resources;
use rstest::rstest;

fn fixture_reader() -> Configuration {
    Configuration::with_search_path(SearchPath::new([resources::root()]))
}

#[test]
fn classpath_load_reads_sample_resource() {
    let mut config = fixture_reader();
    config
        .load_properties("sample.properties", &LoadMode::Classpath)
        .unwrap();

    assert_eq!(config.read_property("sample.properties", "BOUNDARY_TAG").unwrap(), "<EOS>");
    assert_eq!(config.read_property("sample.properties", "DIR").unwrap(), "/opt/app/config");
    assert_eq!(
        config.read_property("sample.properties", "spaced.key").unwrap(),
        "  value with leading spaces"
    );
    assert_eq!(
        config.read_property("sample.properties", "colon.key").unwrap(),
        " colon separated"
    );
}

#[test]
fn classpath_property_names_exclude_comments() {
    let mut config = fixture_reader();
    config.load("sample.properties").unwrap();

    let names = config.property_names("sample.properties").unwrap();
    assert_eq!(names, vec!["BOUNDARY_TAG", "DIR", "colon.key", "spaced.key"]);

    let owned = config.property_names_list("sample.properties").unwrap();
    assert_eq!(owned.len(), 4);
}

#[test]
fn classpath_load_finds_nested_resource() {
    let mut config = fixture_reader();
    config.load("nested/db.properties").unwrap();
    assert_eq!(config.read_property("nested/db.properties", "port").unwrap(), "5432");
}

#[rstest]
#[case("/sample.properties")]
#[case("\"sample.properties\"")]
#[case("\"/nested/db.properties\"")]
fn classpath_resource_normalizes_name(#[case] name: &str) {
    let mut config = fixture_reader();
    let url = config.get_resource(name, &LoadMode::Classpath).unwrap();

    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with(".properties"));
}

#[test]
fn classpath_load_caches_under_original_name() {
    let mut config = fixture_reader();
    config.load("/sample.properties").unwrap();

    assert!(config.properties("/sample.properties").is_some());
    assert!(config.properties("sample.properties").is_none());
}

#[test]
fn classpath_missing_resource_is_not_found() {
    let mut config = fixture_reader();

    let err = config.load("missing.properties").unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound { .. }));
    assert!(err.is_not_found());
    assert!(config.properties("missing.properties").is_none());
}

#[test]
fn classpath_search_path_order_wins() {
    let first = TestDir::new();
    let second = TestDir::new();
    first.write_properties("app.properties", &[("source", "first")]);
    second.write_properties("app.properties", &[("source", "second")]);

    let mut config =
        Configuration::with_search_path(SearchPath::new([first.root(), second.root()]));
    config.load("app.properties").unwrap();

    assert_eq!(config.read_property("app.properties", "source").unwrap(), "first");
}

#[test]
fn physical_load_reads_file_and_sets_base_dir() {
    let dir = TestDir::new();
    let file = dir.write_properties("local.properties", &[("k", "v")]);
    let name = file.to_str().unwrap();

    let mut config = Configuration::default();
    config.load_properties(name, &LoadMode::PhysicalPath).unwrap();

    assert_eq!(config.read_property(name, "k").unwrap(), "v");
    assert_eq!(config.base_dir(), Some(name));
}

#[test]
fn physical_resource_does_not_require_existence() {
    let dir = TestDir::new();
    let name = dir.path("later.properties");

    let mut config = Configuration::default();
    let url = config
        .get_resource(name.to_str().unwrap(), &LoadMode::PhysicalPath)
        .unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/later.properties"));
}

#[test]
fn physical_empty_name_is_malformed() {
    let mut config = Configuration::default();
    let err = config.get_resource("", &LoadMode::PhysicalPath).unwrap_err();
    assert!(matches!(err, Error::MalformedPath { .. }));
}

#[test]
fn physical_missing_file_is_not_found_and_cache_untouched() {
    let dir = TestDir::new();
    let name = dir.path("absent.properties");
    let name = name.to_str().unwrap();

    let mut config = Configuration::default();
    let err = config.load_properties(name, &LoadMode::PhysicalPath).unwrap_err();

    assert!(matches!(err, Error::ResourceNotFound { .. }));
    assert!(config.properties(name).is_none());
    assert_eq!(config.base_dir(), None);
}

#[test]
fn reload_replaces_cached_fields() {
    let dir = TestDir::new();
    let file = dir.write_properties("app.properties", &[("old", "1"), ("shared", "a")]);
    let name = file.to_str().unwrap().to_string();

    let mut config = Configuration::default();
    config.load_properties(&name, &LoadMode::PhysicalPath).unwrap();

    dir.write_properties("app.properties", &[("new", "2"), ("shared", "b")]);
    config.load_properties(&name, &LoadMode::PhysicalPath).unwrap();

    assert_eq!(config.property_names(&name).unwrap(), vec!["new", "shared"]);
    assert_eq!(config.read_property(&name, "shared").unwrap(), "b");
    assert!(matches!(
        config.read_property(&name, "old"),
        Err(Error::FieldNotFound { .. })
    ));
}

#[test]
fn failed_reload_keeps_previous_fields() {
    let dir = TestDir::new();
    let file = dir.write_properties("app.properties", &[("k", "v")]);
    let name = file.to_str().unwrap().to_string();

    let mut config = Configuration::default();
    config.load_properties(&name, &LoadMode::PhysicalPath).unwrap();

    std::fs::remove_file(&file).unwrap();
    assert!(config.load_properties(&name, &LoadMode::PhysicalPath).is_err());
    assert_eq!(config.read_property(&name, "k").unwrap(), "v");
}

#[test]
fn lookups_distinguish_unloaded_from_missing_field() {
    let mut config = fixture_reader();
    config.load("sample.properties").unwrap();

    let unloaded = config.read_property("other.properties", "DIR").unwrap_err();
    assert!(matches!(unloaded, Error::NotLoaded { .. }));

    let missing = config.read_property("sample.properties", "NOPE").unwrap_err();
    assert!(matches!(missing, Error::FieldNotFound { .. }));

    assert!(matches!(
        config.property_names("other.properties"),
        Err(Error::NotLoaded { .. })
    ));
    assert!(matches!(
        config.property_names_list("other.properties"),
        Err(Error::NotLoaded { .. })
    ));
}

#[test]
fn get_resources_drops_unresolved_names() {
    let mut config = fixture_reader();
    let urls = config
        .get_resources(
            &["sample.properties", "missing.properties", "nested/db.properties"],
            &LoadMode::Classpath,
        )
        .unwrap();
    assert_eq!(urls.len(), 2);
}

#[test]
fn get_resources_with_nothing_resolved_fails() {
    let mut config = fixture_reader();

    let err = config
        .get_resources(&["missing.properties"], &LoadMode::Classpath)
        .unwrap_err();
    assert!(matches!(err, Error::NoResourcesResolved { requested: 1 }));

    let empty: [&str; 0] = [];
    let err = config.get_resources(&empty, &LoadMode::Classpath).unwrap_err();
    assert!(matches!(err, Error::NoResourcesResolved { requested: 0 }));
}

fn remote_reader() -> Configuration {
    let store = MemoryObjectStore::new()
        .with_object("hdfs://namenode:8020/conf/app.properties", "# remote\nmode=cluster\n");
    let mut config = Configuration::default();
    config.register_store("hdfs", Arc::new(store)).unwrap();
    config
}

#[test]
fn remote_load_reads_from_registered_store() {
    let name = "hdfs://namenode:8020/conf/app.properties";
    let mut config = remote_reader();

    config.load_properties(name, &LoadMode::remote()).unwrap();

    assert_eq!(config.read_property(name, "mode").unwrap(), "cluster");
    assert_eq!(config.base_dir(), Some("/conf/app.properties"));
}

#[test]
fn remote_prefix_mismatch_is_rejected() {
    let mut config = remote_reader();

    let err = config
        .load_properties("/conf/app.properties", &LoadMode::remote())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRemotePrefix { .. }));
    assert!(config.properties("/conf/app.properties").is_none());
}

#[test]
fn remote_missing_object_is_not_found() {
    let mut config = remote_reader();

    let err = config
        .load_properties("hdfs://namenode:8020/conf/none.properties", &LoadMode::remote())
        .unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound { .. }));
}

#[test]
fn remote_without_store_reports_unavailable_then_not_found_on_load() {
    let mut config = Configuration::default();
    let mode = LoadMode::Remote(RemoteOptions::new("s3"));

    let err = config.get_resource("s3://bucket/a.properties", &mode).unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable { .. }));

    let err = config
        .load_properties("s3://bucket/a.properties", &mode)
        .unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound { .. }));
}

#[test]
fn remote_fallback_scheme_reads_local_files() {
    let dir = TestDir::new();
    let file = dir.write_properties("fallback.properties", &[("k", "local")]);
    let name = url::Url::from_file_path(&file).unwrap().to_string();

    let mut config = Configuration::default();
    let mode = LoadMode::Remote(RemoteOptions::new("file"));
    config.load_properties(&name, &mode).unwrap();

    assert_eq!(config.read_property(&name, "k").unwrap(), "local");
}

#[test]
fn register_store_twice_is_rejected() {
    let mut config = remote_reader();
    let err = config
        .register_store("hdfs", Arc::new(MemoryObjectStore::new()))
        .unwrap_err();
    assert!(matches!(err, Error::StoreAlreadyRegistered { .. }));
}

#[test]
fn base_dir_tracks_most_recent_load_only() {
    let dir = TestDir::new();
    let file = dir.write_properties("a.properties", &[("k", "v")]);
    let physical = file.to_str().unwrap().to_string();

    let mut config = fixture_reader();
    config.load("sample.properties").unwrap();
    assert!(config.base_dir().unwrap().ends_with("/sample.properties"));

    config.load_properties(&physical, &LoadMode::PhysicalPath).unwrap();
    assert_eq!(config.base_dir(), Some(physical.as_str()));
}

#[test]
fn configurable_trait_object_defaults_to_classpath() {
    let mut config = fixture_reader();
    let reader: &mut dyn Configurable = &mut config;

    reader.load("sample.properties").unwrap();
    assert!(reader.resource("sample.properties").is_ok());
    assert_eq!(reader.read_property("sample.properties", "DIR").unwrap(), "/opt/app/config");
}
