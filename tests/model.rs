use gigalixir_deploy::error::DeployError;
use gigalixir_deploy::model::{PodStatus, parse_app_names, parse_current_release, parse_releases};

#[test]
fn app_names_are_unique() {
    let names = parse_app_names(
        r#"[{"unique_name":"api","size":0.3},{"unique_name":"web"},{"unique_name":"api"}]"#,
    )
    .unwrap();

    assert_eq!(names.len(), 2);
    assert!(names.contains("api"));
    assert!(names.contains("web"));
}

#[test]
fn current_release_of_empty_list_is_zero() {
    assert_eq!(parse_current_release("[]").unwrap(), 0);
}

#[test]
fn current_release_takes_first_entry() {
    let json = r#"[
        {"version": "7", "status": "Active"},
        {"version": "6", "status": "Superseded"}
    ]"#;

    assert_eq!(parse_current_release(json).unwrap(), 7);
}

#[test]
fn current_release_accepts_numeric_version() {
    assert_eq!(parse_current_release(r#"[{"version": 12}]"#).unwrap(), 12);
}

#[test]
fn current_release_rejects_non_numeric_version() {
    let err = parse_current_release(r#"[{"version": "abc"}]"#).unwrap_err();

    assert!(matches!(&err, DeployError::InvalidVersion(raw) if raw == "abc"));
}

#[test]
fn releases_keep_cli_order_and_status() {
    let releases = parse_releases(
        r#"[{"version": "3", "status": "Active"}, {"version": 2}]"#,
    )
    .unwrap();

    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0].version, 3);
    assert_eq!(releases[0].status.as_deref(), Some("Active"));
    assert_eq!(releases[1].version, 2);
    assert!(releases[1].status.is_none());
}

#[test]
fn malformed_releases_are_json_errors() {
    let err = parse_current_release(r#"{"version": 1}"#).unwrap_err();

    assert!(matches!(err, DeployError::Json(_)));
}

#[test]
fn ready_when_healthy_pods_reach_desired() {
    let status = PodStatus::parse(
        r#"{"replicas_desired": 2, "pods": [
            {"version": "4", "status": "Healthy"},
            {"version": "4", "status": "Healthy"},
            {"version": "3", "status": "Healthy"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(status.healthy_at(4), 2);
    assert!(status.is_ready(4));
    assert!(!status.is_ready(5));
}

#[test]
fn unhealthy_or_unknown_versions_do_not_count() {
    let status = PodStatus::parse(
        r#"{"replicas_desired": 1, "pods": [
            {"version": "4", "status": "Starting"},
            {"version": null, "status": "Healthy"},
            {"version": "latest", "status": "Healthy"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(status.healthy_at(4), 0);
    assert!(!status.is_ready(4));
}

#[test]
fn missing_pods_field_means_no_pods() {
    let status = PodStatus::parse(r#"{"replicas_desired": 1}"#).unwrap();

    assert!(status.pods.is_empty());
    assert!(!status.is_ready(1));
}
