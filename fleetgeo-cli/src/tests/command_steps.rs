//! Behaviour-driven step definitions driving the CLI command scenarios.

use super::helpers::inventory;
use super::*;
use crate::connection::ConnectionConfig;
use fleetgeo_core::test_support::MemoryRepository;
use fleetgeo_core::{LocationError, VehicleRepository};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Default)]
struct CommandWorld {
    repository: RefCell<Option<MemoryRepository>>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn run(&self, argv: &[&str]) {
        let mut invocation = vec!["fleetgeo"];
        invocation.extend_from_slice(argv);
        let repository = self.repository.borrow();
        let repository = repository
            .as_ref()
            .expect("a Given step must configure the inventory");
        let mut stdout = self.stdout.borrow_mut();
        let outcome = Cli::try_parse_from(invocation)
            .map_err(CliError::ArgumentParsing)
            .and_then(|cli| run_command(cli.command, repository, &mut *stdout));
        self.result.replace(Some(outcome));
    }

    fn output(&self) -> serde_json::Value {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::default()
}

// --- Given steps ---

#[given("an inventory of three vehicles")]
fn three_vehicles(#[from(world)] world: &CommandWorld) {
    *world.repository.borrow_mut() = Some(inventory());
}

#[given("no base URL is configured")]
fn no_base_url(#[from(world)] world: &CommandWorld) {
    world.cli_args.borrow_mut().clear();
}

// --- When steps ---

#[when("I run the list command")]
fn run_list(#[from(world)] world: &CommandWorld) {
    world.run(&["list"]);
}

#[when("I get vehicle 99")]
fn get_unknown(#[from(world)] world: &CommandWorld) {
    world.run(&["get", "99"]);
}

#[when("I add a vehicle at latitude 91")]
fn add_out_of_range(#[from(world)] world: &CommandWorld) {
    world.run(&[
        "add", "--name", "Nowhere", "--model", "Hatch", "--year", "2022", "--color", "white",
        "--price", "1", "--latitude", "91", "--longitude", "0",
    ]);
}

#[when("I ask for the vehicle nearest to vehicle 1")]
fn ask_nearest(#[from(world)] world: &CommandWorld) {
    world.run(&["nearest", "1"]);
}

#[when("I resolve the connection settings")]
fn resolve_connection(#[from(world)] world: &CommandWorld) {
    let mut invocation = vec!["fleetgeo".to_owned()];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    invocation.push("list".to_owned());
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| ConnectionConfig::try_from(cli.connection()))
        .map(|_| ());
    world.result.replace(Some(outcome));
}

// --- Then steps ---

fn failure(world: &CommandWorld) -> std::cell::Ref<'_, CliError> {
    std::cell::Ref::map(world.result.borrow(), |result| {
        result
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error")
    })
}

#[then("the command prints 3 vehicles")]
fn prints_three(#[from(world)] world: &CommandWorld) {
    let output = world.output();
    let vehicles = output.as_array().expect("output should be an array");
    assert_eq!(vehicles.len(), 3);
}

#[then("the command fails because vehicle 99 was not found")]
fn fails_not_found(#[from(world)] world: &CommandWorld) {
    match &*failure(world) {
        CliError::VehicleNotFound { id } => assert_eq!(*id, 99),
        other => panic!("expected VehicleNotFound, found {other:?}"),
    }
}

#[then("the command fails because the location is invalid")]
fn fails_invalid_location(#[from(world)] world: &CommandWorld) {
    match &*failure(world) {
        CliError::InvalidLocation(LocationError::Latitude(latitude)) => {
            assert_eq!(*latitude, 91.0);
        }
        other => panic!("expected InvalidLocation, found {other:?}"),
    }
}

#[then("the inventory still holds 3 vehicles")]
fn inventory_unchanged(#[from(world)] world: &CommandWorld) {
    let repository = world.repository.borrow();
    let vehicles = repository
        .as_ref()
        .expect("inventory configured")
        .fetch_vehicles()
        .expect("memory fetch");
    assert_eq!(vehicles.len(), 3);
}

#[then("the command prints vehicle 3 as the nearest")]
fn prints_nearest(#[from(world)] world: &CommandWorld) {
    let output = world.output();
    assert_eq!(output["nearest"]["id"], serde_json::json!(3));
}

#[then("the CLI reports that the \"base-url\" flag is missing")]
fn reports_missing_base_url(#[from(world)] world: &CommandWorld) {
    match &*failure(world) {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_BASE_URL);
            assert_eq!(*env, ENV_BASE_URL);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(listing_inventory, "listing the inventory");
register_command_scenario!(getting_unknown_vehicle, "getting a vehicle that does not exist");
register_command_scenario!(
    adding_invalid_location,
    "adding a vehicle with an impossible latitude"
);
register_command_scenario!(finding_nearest, "finding the nearest vehicle");
register_command_scenario!(missing_base_url, "running without a base URL");
