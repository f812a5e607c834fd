use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};

/// Seven transactions over four categories. Three carry overconsumption,
/// the generator has no distance, and `Station` is an unused extra column.
pub const FLEET_CSV: &str = "\
Transaction Id,Plate #,Long Description,Fuel Qty,ODO Diff,Overconsumption %,Overconsumption Liter,Txn FCU,Station
T001,ABC-101,Pickup,50,400,,,50,North
T002,ABC-101,Pickup,60,420,12%,6.5,60,North
T003,ABC-102,Pickup,45,380,,,45,South
T004,BUS-201,Bus,120,500,8,9.6,120,North
T005,BUS-201,Bus,130,520,,,130,North
T006,TRK-301,Truck,200,800,15,30,200,East
T007,GEN-401,Generator,40,0,,,40,East
";

pub fn temp_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let written = fs::write(&path, body);
    assert!(written.is_ok());
    path
}

pub fn fleet_in(dir: &Path) -> String {
    write_fixture(dir, "Data.csv", FLEET_CSV)
        .display()
        .to_string()
}
