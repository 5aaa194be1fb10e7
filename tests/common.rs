#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use shiftgrid::config::Config;
use shiftgrid::core::roster::Roster;
use shiftgrid::db::pool::DbPool;
use shiftgrid::db::queries::load_roster;
use shiftgrid::models::variant::Variant;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sg() -> Command {
    cargo_bin_cmd!("shiftgrid")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftgrid.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init(db_path: &str) {
    sg().args(["--db", db_path, "--test", "init"]).assert().success();
}

/// Add a single-shift employee with default times (10:00 ~ 18:00).
pub fn add_single(db_path: &str, name: &str, role: &str) {
    sg().args(["--db", db_path, "add", "--name", name, "--role", role])
        .assert()
        .success();
}

/// Read the stored roster back through the library.
pub fn stored_roster(db_path: &str, variant: Variant) -> Roster {
    let pool = DbPool::new(db_path).expect("open db");
    let cfg = Config {
        database: db_path.to_string(),
        variant,
        ..Config::default()
    };
    load_roster(&pool, &cfg).expect("load roster")
}

pub fn single_ids(db_path: &str) -> Vec<String> {
    match stored_roster(db_path, Variant::Single) {
        Roster::Single(r) => r.employees().iter().map(|e| e.id.to_string()).collect(),
        Roster::Dual(_) => panic!("expected single roster"),
    }
}
