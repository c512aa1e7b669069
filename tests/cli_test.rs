use std::process::Command;

fn stackdb_bin() -> String {
    env!("CARGO_BIN_EXE_stackdb").to_string()
}

fn input(name: &str) -> String {
    format!("{}/tests/input/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn plan(args: &[&str]) -> std::process::Output {
    Command::new(stackdb_bin())
        .arg("plan")
        .args(args)
        .env_remove("NOVA_DB_PASSWORD")
        .output()
        .expect("failed to run stackdb")
}

#[test]
fn test_plan_with_only_required_parameters() {
    let out = plan(&["--config", &input("openstack.yaml"), "--show-secrets"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "plan should succeed: {}", stderr);

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["server"]["root_password"], "root_pw");
    assert_eq!(v["server"]["bind_address"], "0.0.0.0");

    let grants = v["grants"].as_array().unwrap();
    assert_eq!(grants.len(), 5);
    for (grant, svc) in grants
        .iter()
        .zip(["keystone", "glance", "nova", "cinder", "quantum"])
    {
        assert_eq!(grant["user"], svc);
        assert_eq!(grant["password"], format!("{}_pass", svc));
        assert_eq!(grant["host"], "127.0.0.1");
        assert_eq!(grant["dbname"], svc);
        assert_eq!(grant["allowed_hosts"], false);
    }
}

#[test]
fn test_plan_redacts_by_default() {
    let out = plan(&["--config", &input("openstack.yaml")]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("root_pw"), "{}", stdout);
    assert!(!stdout.contains("nova_pass"), "{}", stdout);
    assert!(stdout.contains("REDACTED"));
}

#[test]
fn test_plan_password_from_env() {
    let out = Command::new(stackdb_bin())
        .args(["plan", "--config", &input("openstack.yaml"), "--show-secrets"])
        .env("NOVA_DB_PASSWORD", "other_pw")
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["grants"][2]["user"], "nova");
    assert_eq!(v["grants"][2]["password"], "other_pw");
    assert_eq!(v["grants"][1]["password"], "glance_pass");
    assert_eq!(v["grants"][3]["password"], "cinder_pass");
}

#[test]
fn test_plan_missing_parameter_fails() {
    let out = plan(&["--config", &input("missing-cinder.yaml")]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty(), "no declarations on failure");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("missing required parameter 'cinder_db_password'"),
        "expected missing parameter error: {}",
        stderr
    );
}

#[test]
fn test_plan_json_config_redhat() {
    let out = plan(&["--config", &input("redhat.json"), "--format", "yaml"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "plan should succeed: {}", stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("osfamily: RedHat"), "{}", stdout);
    assert!(stdout.contains("service: mysqld"), "{}", stdout);
    assert!(stdout.contains("10.0.0.%"), "{}", stdout);
}

#[test]
fn test_osfamily_flag_overrides_fact() {
    let out = plan(&["--config", &input("openstack.yaml"), "--osfamily", "redhat"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["osfamily"], "RedHat");
    assert_eq!(v["config_files"][0]["path"], "/etc/my.cnf.d/bind-address.cnf");
}

#[test]
fn test_unsupported_osfamily() {
    let out = plan(&["--config", &input("openstack.yaml"), "--osfamily", "Solaris"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unsupported osfamily"), "{}", stderr);
}

#[test]
fn test_env_var_fallback_for_config_and_json() {
    let out = Command::new(stackdb_bin())
        .arg("plan")
        .env("STACKDB_CONFIG", input("openstack.yaml"))
        .env("STACKDB_JSON", "true")
        .output()
        .unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("\"msg\""),
        "expected JSON logs when STACKDB_JSON=true, got: {}",
        stderr
    );
}

#[test]
fn test_apply_dry_run_writes_config_files() {
    let root = tempfile::TempDir::new().unwrap();
    let out = Command::new(stackdb_bin())
        .args([
            "apply",
            "--config",
            &input("openstack.yaml"),
            "--dry-run",
        ])
        .env("STACKDB_CONFIG_ROOT", root.path())
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "dry run should succeed: {}", stderr);
    assert!(stderr.contains("dry run"), "{}", stderr);
    assert!(stderr.contains("GRANT ALL PRIVILEGES ON `keystone`.*"), "{}", stderr);
    assert!(!stderr.contains("keystone_pass"), "{}", stderr);
    assert!(
        !root.path().join("etc/mysql/conf.d/bind-address.cnf").exists(),
        "dry run must not write files"
    );
}

#[test]
fn test_missing_config_flag() {
    let out = Command::new(stackdb_bin())
        .arg("plan")
        .env_remove("STACKDB_CONFIG")
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--config"), "{}", stderr);
}

#[test]
fn test_plan_env_password_with_yaml_specials() {
    let password = "n\\ova\"#: x\\n";
    let out = Command::new(stackdb_bin())
        .args(["plan", "--config", &input("openstack.yaml"), "--show-secrets"])
        .env("NOVA_DB_PASSWORD", password)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "plan should succeed: {}", stderr);
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["grants"][2]["password"], password);
}
