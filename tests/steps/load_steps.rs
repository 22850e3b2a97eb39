//! Behavioural steps for loading configuration.
//!
//! Scenarios read from an in-memory environment, so they can run
//! concurrently without touching the process environment.
#![expect(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use std::collections::HashMap;

use cucumber::{World, given, then, when};
use envconf::{Kind, LoadError, Loader, Record};

#[derive(Debug, Default, Record)]
pub struct Server {
    #[env(key = "PORT", default = "8080")]
    port: i64,
    #[env(key = "NAME")]
    name: String,
    #[env(key = "DEBUG")]
    debug: bool,
    tls: Tls,
}

#[derive(Debug, Default, Record)]
pub struct Tls {
    #[env(key = "TLS_CERT")]
    cert_path: String,
}

#[derive(Debug, Default, Record)]
pub struct Limits {
    #[env(key = "MAX_BODY", default = "1024")]
    max_body: i64,
}

#[derive(Debug, Default, Record)]
pub struct Misannotated {
    #[env(key = "X")]
    limits: Box<Limits>,
}

#[derive(Debug)]
enum Target {
    Server(Server),
    Misannotated(Misannotated),
    Scalar(i64),
}

#[derive(Debug, Default, World)]
pub struct LoadWorld {
    vars: HashMap<String, String>,
    target: Option<Target>,
    result: Option<Result<(), LoadError>>,
}

impl LoadWorld {
    fn server(&self) -> &Server {
        match &self.target {
            Some(Target::Server(server)) => server,
            other => panic!("expected a server configuration, got {other:?}"),
        }
    }
}

#[given("a server configuration")]
fn server_configuration(world: &mut LoadWorld) {
    world.target = Some(Target::Server(Server::default()));
}

#[given("a configuration with an annotated pointer field")]
fn misannotated_configuration(world: &mut LoadWorld) {
    world.target = Some(Target::Misannotated(Misannotated::default()));
}

#[given("a scalar target")]
fn scalar_target(world: &mut LoadWorld) {
    world.target = Some(Target::Scalar(0));
}

#[given(regex = r#"^the environment variable \"(.+)\" is \"(.*)\"$"#)]
fn environment_variable(world: &mut LoadWorld, key: String, value: String) {
    world.vars.insert(key, value);
}

#[when("the configuration is loaded")]
fn load_configuration(world: &mut LoadWorld) {
    let loader = Loader::with_source(&world.vars);
    let result = match world.target.as_mut().expect("target set") {
        Target::Server(server) => loader.load(server),
        Target::Misannotated(cfg) => loader.load(cfg),
        Target::Scalar(value) => loader.load(value),
    };
    world.result = Some(result);
}

#[then("loading succeeds")]
fn loading_succeeds(world: &mut LoadWorld) {
    match world.result.take() {
        Some(Ok(())) => {}
        other => panic!("expected success, got {other:?}"),
    }
}

#[then(regex = r"^the port is (\d+)$")]
fn port_is(world: &mut LoadWorld, expected: i64) {
    assert_eq!(world.server().port, expected);
}

#[then(regex = r#"^the name is \"(.*)\"$"#)]
fn name_is(world: &mut LoadWorld, expected: String) {
    assert_eq!(world.server().name, expected);
}

#[then(regex = r#"^the certificate path is \"(.+)\"$"#)]
fn certificate_path_is(world: &mut LoadWorld, expected: String) {
    assert_eq!(world.server().tls.cert_path, expected);
}

#[then(regex = r#"^loading fails with a parse error for \"(.+)\"$"#)]
fn parse_error_for(world: &mut LoadWorld, expected: String) {
    match world.result.take() {
        Some(Err(LoadError::Parse { key, .. })) => assert_eq!(key, expected),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(!world.server().debug);
}

#[then(regex = r#"^loading fails with a schema error naming \"(.+)\"$"#)]
fn schema_error_naming(world: &mut LoadWorld, expected: String) {
    match world.result.take() {
        Some(Err(LoadError::Schema { field, kind })) => {
            assert_eq!(field, expected);
            assert_eq!(kind, Kind::Boxed);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[then("loading fails with a type error")]
fn type_error(world: &mut LoadWorld) {
    match world.result.take() {
        Some(Err(LoadError::Type { kind })) => assert_eq!(kind, Kind::I64),
        other => panic!("expected type error, got {other:?}"),
    }
}
