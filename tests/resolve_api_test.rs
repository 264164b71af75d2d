//! Integration tests for the resolution facade and text surface.

use wbi::matrix::SupportRule;
use wbi::url::template_for;
use wbi::{
    build_reference, Arch, CompatibilityMatrix, Component, OperatingSystem, ReleaseVersion, ResolveError,
    Resolver, StaticSource, VersionRequest,
};

const R_VERSIONS: &str = r#"{"r_versions": [
    "3.0.3", "3.3.3", "3.5.3", "3.6.3", "4.0.5", "4.1.0", "4.2.0", "4.2.1", "4.3.1", "4.3.2", "devel"
]}"#;

const PYTHON_VERSIONS: &str = r#"{"python_versions": [
    "2.7.18", "3.6.15", "3.7.17", "3.8.17", "3.9.17", "3.10.12", "3.11.4", "3.12.0"
]}"#;

const QUARTO_RELEASES: &str = r#"[
    {"tag_name": "v1.4.330", "prerelease": true},
    {"tag_name": "v1.3.450", "prerelease": false},
    {"tag_name": "v1.2.475", "prerelease": false},
    {"tag_name": "v1.1.189", "prerelease": false}
]"#;

const DOWNLOADS_JSON: &str = r#"{
    "rstudio": {"pro": {"stable": {"server": {"installer": {
        "bionic": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/bionic/amd64/rstudio-workbench-2023.03.0-386.pro1-amd64.deb"},
        "focal": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/focal/amd64/rstudio-workbench-2023.03.0-386.pro1-amd64.deb"},
        "jammy": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/jammy/amd64/rstudio-workbench-2023.03.0-386.pro1-amd64.deb"},
        "redhat7_64": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/centos7/x86_64/rstudio-workbench-rhel-2023.03.0-386.pro1-x86_64.rpm"},
        "rhel8": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/rhel8/x86_64/rstudio-workbench-rhel-2023.03.0-386.pro1-x86_64.rpm"},
        "rhel9": {"version": "2023.03.0+386.pro1", "url": "https://download2.rstudio.org/server/rhel9/x86_64/rstudio-workbench-rhel-2023.03.0-386.pro1-x86_64.rpm"},
        "windows": {"version": "2023.03.0+386.pro1", "url": "https://example.com/setup.exe"}
    }}}}},
    "pro_drivers": {"installer": {
        "deb": {"version": "2023.05.0", "url": "https://cdn.rstudio.com/drivers/7C152C12/installer/rstudio-drivers_2023.05.0_amd64.deb"},
        "rh7": {"version": "2023.05.0", "url": "https://cdn.rstudio.com/drivers/7C152C12/installer/rstudio-drivers-2023.05.0-1.el7.x86_64.rpm"},
        "rh8": {"version": "2023.05.0", "url": "https://cdn.rstudio.com/drivers/7C152C12/installer/rstudio-drivers-2023.05.0-1.el8.x86_64.rpm"}
    }}
}"#;

fn fixtures() -> StaticSource {
    StaticSource::new()
        .with(Component::R, R_VERSIONS)
        .with(Component::Python, PYTHON_VERSIONS)
        .with(Component::Quarto, QUARTO_RELEASES)
        .with(Component::Workbench, DOWNLOADS_JSON)
        .with(Component::ProDrivers, DOWNLOADS_JSON)
}

fn exact(s: &str) -> VersionRequest {
    VersionRequest::Exact(ReleaseVersion::parse(s).unwrap())
}

#[test]
fn available_versions_strictly_descend_everywhere() {
    let resolver = Resolver::new(fixtures());
    for component in Component::ALL {
        for os in OperatingSystem::ALL {
            let available = resolver.available(component, os).unwrap();
            let versions: Vec<_> = available.versions().collect();
            for pair in versions.windows(2) {
                assert!(pair[0] > pair[1], "{} on {}: {} !> {}", component, os, pair[0], pair[1]);
                assert!(!pair[0].same_release(pair[1]));
            }
        }
    }
}

#[test]
fn latest_matches_first_available_everywhere() {
    let resolver = Resolver::new(fixtures());
    for component in Component::ALL {
        for os in OperatingSystem::ALL {
            let available = resolver.available(component, os).unwrap();
            let Some(first) = available.latest() else {
                continue;
            };
            let latest = resolver
                .try_resolve_installer(component, &VersionRequest::Latest, os)
                .unwrap();
            let pinned = resolver
                .try_resolve_installer(component, &VersionRequest::Exact(first.version.clone()), os)
                .unwrap();
            assert_eq!(latest, pinned, "{} on {}", component, os);
        }
    }
}

#[test]
fn templated_urls_carry_their_version() {
    let resolver = Resolver::new(fixtures());
    for component in [Component::R, Component::Python, Component::Quarto] {
        for os in OperatingSystem::ALL {
            for version in resolver.list_versions(component, os) {
                let reference = resolver
                    .try_resolve_installer(component, &exact(&version), os)
                    .unwrap();
                let template = template_for(component, os).unwrap();
                assert_eq!(
                    template.extract_version(&reference.url, os, Arch::X86_64),
                    Some(version.clone())
                );
            }
        }
    }
}

#[test]
fn filtered_out_version_is_not_substituted() {
    let resolver = Resolver::new(fixtures());

    // 3.3.3 is in the catalog but predates the jammy builds.
    assert!(resolver.catalog(Component::R).unwrap().find(&ReleaseVersion::parse("3.3.3").unwrap()).is_some());
    let err = resolver
        .try_resolve_installer(Component::R, &exact("3.3.3"), OperatingSystem::Ubuntu22)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::VersionNotFound {
            component: Component::R,
            version: "3.3.3".to_string(),
            os: OperatingSystem::Ubuntu22,
        }
    );

    // The builder refuses the same version when handed focal's releases.
    let focal = resolver.available(Component::R, OperatingSystem::Ubuntu20).unwrap();
    let version = ReleaseVersion::parse("3.3.3").unwrap();
    assert!(focal.find(&version).is_some());
    assert!(build_reference(&focal, &version, OperatingSystem::Ubuntu22, Arch::X86_64).is_err());

    // 4.3.2 is newer than the last bionic build.
    assert!(resolver
        .try_resolve_installer(Component::R, &exact("4.3.2"), OperatingSystem::Ubuntu18)
        .is_err());
}

#[test]
fn worked_example_from_the_rule_table() {
    let matrix = CompatibilityMatrix::new(vec![
        SupportRule {
            component: Component::R,
            os: OperatingSystem::Ubuntu22,
            min: Some((4, 0, 0)),
            max: None,
        },
        SupportRule {
            component: Component::R,
            os: OperatingSystem::Redhat9,
            min: Some((4, 2, 0)),
            max: None,
        },
    ]);
    let source = StaticSource::new().with(Component::R, r#"{"r_versions": ["4.1.0", "4.2.0", "4.2.1"]}"#);
    let resolver = Resolver::new(source).with_matrix(matrix);

    assert_eq!(
        resolver.try_list_versions(Component::R, OperatingSystem::Ubuntu22).unwrap(),
        vec!["4.2.1", "4.2.0", "4.1.0"]
    );
    let latest = resolver
        .try_resolve_installer(Component::R, &VersionRequest::Latest, OperatingSystem::Ubuntu22)
        .unwrap();
    assert_eq!(latest.version(), "4.2.1");
    assert_eq!(latest.url, "https://cdn.rstudio.com/r/ubuntu-2204/pkgs/r-4.2.1_1_amd64.deb");

    assert_eq!(
        resolver.try_list_versions(Component::R, OperatingSystem::Redhat9).unwrap(),
        vec!["4.2.1", "4.2.0"]
    );
    let err = resolver
        .try_resolve_installer(Component::R, &exact("4.1.0"), OperatingSystem::Redhat9)
        .unwrap_err();
    assert!(matches!(err, ResolveError::VersionNotFound { .. }));

    let err = resolver
        .try_list_versions(Component::R, OperatingSystem::Redhat8)
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedPlatform { .. }));
    assert!(resolver.list_versions(Component::R, OperatingSystem::Redhat8).is_empty());
}

#[test]
fn manifest_components_return_upstream_urls() {
    let resolver = Resolver::new(fixtures());

    let workbench = resolver
        .try_resolve_installer(Component::Workbench, &VersionRequest::Latest, OperatingSystem::Redhat9)
        .unwrap();
    assert_eq!(workbench.version(), "2023.03.0+386.pro1");
    assert_eq!(
        workbench.url,
        "https://download2.rstudio.org/server/rhel9/x86_64/rstudio-workbench-rhel-2023.03.0-386.pro1-x86_64.rpm"
    );

    let drivers = resolver
        .try_resolve_installer(Component::ProDrivers, &VersionRequest::Latest, OperatingSystem::Ubuntu18)
        .unwrap();
    assert!(drivers.url.ends_with("rstudio-drivers_2023.05.0_amd64.deb"));

    // No rh9 driver build is published.
    assert!(resolver.list_versions(Component::ProDrivers, OperatingSystem::Redhat9).is_empty());
    let unresolved = resolver.resolve_installer(Component::ProDrivers, &VersionRequest::Latest, OperatingSystem::Redhat9);
    assert!(!unresolved.is_resolved());
}

#[test]
fn garbage_metadata_never_escapes_the_text_surface() {
    let garbage = StaticSource::new()
        .with(Component::R, "<!doctype html>")
        .with(Component::Python, "")
        .with(Component::Quarto, r#"{"message": "API rate limit exceeded"}"#)
        .with(Component::Workbench, "[]")
        .with(Component::ProDrivers, "null");

    for os in OperatingSystem::ALL {
        let code = os.code();
        assert_eq!(wbi::surface::r_versions(&garbage, code), "");
        assert_eq!(wbi::surface::python_versions(&garbage, code), "");
        assert_eq!(wbi::surface::quarto_versions(&garbage, code), "");
        assert_eq!(wbi::surface::quarto_url(&garbage, code, "latest"), "");
        assert_eq!(wbi::surface::workbench_url(&garbage, code), (String::new(), String::new()));
        assert_eq!(wbi::surface::driver_url(&garbage, code), (String::new(), String::new()));
    }
}

#[test]
fn text_surface_matches_the_structured_path() {
    let source = fixtures();
    let resolver = Resolver::new(&source);
    for os in OperatingSystem::ALL {
        let structured = resolver.list_versions(Component::Python, os).join(" ");
        assert_eq!(wbi::surface::python_versions(&source, os.code()), structured);

        let reference = resolver.resolve_installer(Component::Workbench, &VersionRequest::Latest, os);
        assert_eq!(
            wbi::surface::workbench_url(&source, os.code()),
            (reference.version().to_string(), reference.url)
        );
    }
}

#[test]
fn resolver_is_shareable_across_threads() {
    let resolver = Resolver::new(fixtures());
    std::thread::scope(|scope| {
        let handles: Vec<_> = OperatingSystem::ALL
            .iter()
            .map(|os| {
                let resolver = &resolver;
                scope.spawn(move || resolver.list_versions(Component::Quarto, *os))
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap().is_empty());
        }
    });
}
