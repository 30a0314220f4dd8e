use gigalixir_deploy::actions::{escape_data, group};
use gigalixir_deploy::error::DeployError;

#[test]
fn escape_newlines_and_percent() {
    assert_eq!(escape_data("100% done\r\nnext"), "100%25 done%0D%0Anext");
}

#[test]
fn escape_plain_text_unchanged() {
    assert_eq!(escape_data("Migration failed"), "Migration failed");
}

#[test]
fn group_returns_inner_value() {
    assert_eq!(group("step", || Ok(42)).unwrap(), 42);
}

#[test]
fn group_propagates_inner_error() {
    let result: Result<(), _> = group("step", || Err(DeployError::KeyInstallFailed));
    assert!(matches!(result, Err(DeployError::KeyInstallFailed)));
}
