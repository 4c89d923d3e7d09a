//! Argument parsing and connection-setting precedence.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hammertime_cli::application::ports::ConfigStore;
use hammertime_cli::cli::{Cli, Command};
use hammertime_cli::domain::{GrpcConfig, HammertimeConfig};

struct StaticConfig(HammertimeConfig);

impl ConfigStore for StaticConfig {
    fn load(&self) -> Result<HammertimeConfig> {
        Ok(self.0.clone())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("static.yaml"))
    }
}

struct BrokenConfig;

impl ConfigStore for BrokenConfig {
    fn load(&self) -> Result<HammertimeConfig> {
        anyhow::bail!("cannot parse broken.yaml")
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("broken.yaml"))
    }
}

fn file_config() -> StaticConfig {
    StaticConfig(HammertimeConfig {
        grpc: GrpcConfig {
            address: "10.0.0.7".to_string(),
            port: 9191,
            connect_timeout_secs: 3,
            request_timeout_secs: 7,
        },
    })
}

#[test]
fn test_subcommand_aliases_parse() {
    for (alias, expect) in [("c", "create"), ("g", "get"), ("l", "list"), ("d", "delete")] {
        let cli = Cli::try_parse_from(["hammertime", alias, "--id", "x"])
            .or_else(|_| Cli::try_parse_from(["hammertime", alias]))
            .unwrap();
        let name = match cli.command {
            Command::Create(_) => "create",
            Command::Get(_) => "get",
            Command::List(_) => "list",
            Command::Delete(_) => "delete",
        };
        assert_eq!(name, expect);
    }
}

#[test]
fn test_create_defaults_and_ns_alias() {
    let cli = Cli::try_parse_from(["hammertime", "create"]).unwrap();
    let Command::Create(args) = cli.command else {
        panic!("expected create");
    };
    assert_eq!(args.name, "mvm0");
    assert_eq!(args.namespace, "ns0");

    let cli = Cli::try_parse_from(["hammertime", "create", "-n", "a", "--ns", "b", "-k", "key.pub"])
        .unwrap();
    let Command::Create(args) = cli.command else {
        panic!("expected create");
    };
    assert_eq!(args.name, "a");
    assert_eq!(args.namespace, "b");
    assert_eq!(args.public_key_path, Some(PathBuf::from("key.pub")));
}

#[test]
fn test_delete_short_all_does_not_clash_with_grpc_address() {
    let cli = Cli::try_parse_from([
        "hammertime", "-a", "flintlock.lan", "delete", "-a", "--ns", "ns0",
    ])
    .unwrap();
    assert_eq!(cli.grpc_address.as_deref(), Some("flintlock.lan"));
    let Command::Delete(args) = cli.command else {
        panic!("expected delete");
    };
    assert!(args.all);
    assert_eq!(args.namespace.as_deref(), Some("ns0"));
}

#[test]
fn test_get_state_flag() {
    let cli = Cli::try_parse_from(["hammertime", "get", "-i", "uid-1", "-s"]).unwrap();
    let Command::Get(args) = cli.command else {
        panic!("expected get");
    };
    assert!(args.state);
    assert_eq!(args.id.as_deref(), Some("uid-1"));
}

#[test]
fn test_flags_override_config_file() {
    let cli = Cli::try_parse_from([
        "hammertime", "-a", "flintlock.lan", "-p", "9999", "-t", "s3cret", "list",
    ])
    .unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "flintlock.lan:9999");
    assert_eq!(client.auth_token.as_deref(), Some("s3cret"));
    assert_eq!(client.request_timeout, Duration::from_secs(7));
}

#[test]
fn test_config_file_fills_unset_flags() {
    let cli = Cli {
        grpc_address: None,
        grpc_port: None,
        basic_auth_token: None,
        ..Cli::try_parse_from(["hammertime", "list"]).unwrap()
    };
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "10.0.0.7:9191");
    assert_eq!(client.connect_timeout, Duration::from_secs(3));
    assert_eq!(client.auth_token, None);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let cli = Cli {
        grpc_address: None,
        grpc_port: None,
        basic_auth_token: None,
        ..Cli::try_parse_from(["hammertime", "list"]).unwrap()
    };
    let client = cli.client_config(&BrokenConfig).unwrap();
    assert_eq!(client.address, "127.0.0.1:9090");
}

#[test]
fn test_port_zero_is_rejected() {
    let cli = Cli::try_parse_from(["hammertime", "-p", "0", "list"]).unwrap();
    let err = cli.client_config(&file_config()).unwrap_err();
    assert!(err.to_string().contains("invalid grpc port"), "got: {err}");
}

#[test]
fn test_connection_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["hammertime", "list", "--grpc-address", "10.0.0.1"]).unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "10.0.0.1:9191");

    let cli = Cli::try_parse_from([
        "hammertime", "create", "-a", "10.0.0.1", "-p", "9091", "-t", "s3cret",
    ])
    .unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "10.0.0.1:9091");
    assert_eq!(client.auth_token.as_deref(), Some("s3cret"));

    let cli = Cli::try_parse_from(["hammertime", "get", "-i", "uid-1", "-p", "9092"]).unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "10.0.0.7:9092");
}

#[test]
fn test_subcommand_connection_flags_win_over_top_level() {
    let cli = Cli::try_parse_from([
        "hammertime", "-a", "outer.lan", "-p", "1111", "list", "-a", "inner.lan",
    ])
    .unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "inner.lan:1111");
}

#[test]
fn test_delete_takes_long_grpc_address_with_short_all() {
    let cli = Cli::try_parse_from([
        "hammertime",
        "delete",
        "--grpc-address",
        "flintlock.lan",
        "-p",
        "9093",
        "-a",
        "--ns",
        "ns0",
    ])
    .unwrap();
    let client = cli.client_config(&file_config()).unwrap();
    assert_eq!(client.address, "flintlock.lan:9093");
    let Command::Delete(args) = cli.command else {
        panic!("expected delete");
    };
    assert!(args.all);
    assert_eq!(args.grpc_address.as_deref(), Some("flintlock.lan"));
}
