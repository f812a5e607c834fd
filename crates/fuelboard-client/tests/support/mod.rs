pub mod fleet_fixture;
