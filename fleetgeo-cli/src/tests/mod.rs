//! Shared test harness modules for the fleetgeo CLI.

use super::*;

mod command_steps;
mod helpers;
