//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_non_export_lines_in_mod_files, path_exists, read_relative,
};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "reqwest::",
            "diesel::",
        ],
    );

    assert!(hits.is_empty(), "ports should only depend on domain: {hits:#?}");
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_transport_or_storage_crates() {
    let hits = find_lines_containing("src/application", &["reqwest::", "diesel::", "std::fs"]);
    assert!(
        hits.is_empty(),
        "application layer should reach storage and the network through ports: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn outbound_ports_are_split_per_collaborator() {
    for file in [
        "src/port/outbound/persistence.rs",
        "src/port/outbound/price.rs",
        "src/port/outbound/predictor.rs",
    ] {
        assert!(path_exists(file), "expected outbound port `{file}`");
    }
}

#[test]
fn cli_commands_are_wired_through_bootstrap() {
    for handler in ["predict", "reconcile", "accuracy", "history", "export"] {
        let source = read_relative(&format!("src/adapter/inbound/cli/{handler}.rs"));
        assert!(
            source.contains("bootstrap::build_store"),
            "`{handler}` handler should obtain its store from the composition root"
        );
    }
}

#[test]
fn api_key_is_never_read_from_config_file() {
    let source = read_relative("src/infrastructure/config/predictor.rs");
    assert!(
        source.contains("#[serde(skip)]"),
        "predictor api_key should be skipped by serde"
    );
}
