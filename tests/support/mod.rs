use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small Steam-style catalog: the first column header is blank, like a
/// spreadsheet index column.
pub const CATALOG: &str = "\
,Genre1,Genre2,Genre3,Tag1,Tag2,PosPercent,TotalReviews
Skyrim\u{2122},RPG,Open World,,Fantasy,Singleplayer,94%,\"500,000\"
Witcher 3,RPG,Open World,,Fantasy,Story Rich,97%,\"600,000\"
Fallout 4,RPG,Open World,,Post-apocalyptic,Singleplayer,78%,\"300,000\"
Portal 2,Puzzle,,,Co-op,Singleplayer,99%,\"250,000\"
Tetris,Puzzle,,,,,na,900
Untagged,,,,,,50%,10
";

/// Get a Command for gamerec
pub fn gamerec() -> Command {
    cargo_bin_cmd!("gamerec")
}

/// Write the sample catalog into `dir` and return its path
pub fn write_catalog(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("games.csv");
    fs::write(&path, CATALOG).unwrap();
    path
}

/// Setup a store and return the directory only
#[allow(dead_code)]
pub fn setup_test_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    gamerec()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Setup a store with every stage built from the sample catalog
#[allow(dead_code)]
pub fn setup_built_store() -> TempDir {
    let dir = setup_test_dir();
    let catalog = write_catalog(&dir);
    gamerec()
        .current_dir(dir.path())
        .arg("build")
        .arg(&catalog)
        .assert()
        .success();
    dir
}
