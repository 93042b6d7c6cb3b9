//! Integration tests for the CLI subcommands

use hdlrefactor::commands;
use hdlrefactor::{Config, Pass};
use hdlrefactor_core::database::read_tables;
use hdlrefactor_core::ALL_SCOPE;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OLD_RAM: &str = "\
entity psi_common_tdp_ram is
  generic (
    Depth_g : positive := 1024;
    Width_g : positive := 32
  );
  port (
    ClkA  : in  std_logic;
    AddrA : in  std_logic_vector(9 downto 0)
  );
end entity;
";

const NEW_RAM: &str = "\
entity psi_common_tdp_ram is
  generic (
    depth_g : positive := 1024;
    width_g : positive := 32
  );
  port (
    a_clk_i  : in  std_logic;
    a_addr_i : in  std_logic_vector(9 downto 0)
  );
end entity;
";

const USER: &str = "\
architecture rtl of top is
begin
  i_ram : entity work.psi_common_tdp_ram
    generic map (
      Depth_g => 512,
      Width_g => 8
    )
    port map (
      ClkA  => clk,
      AddrA => addr
    );

  mask <= ZerosVector(8);
end architecture;
";

const USER_EXPECTED: &str = "\
architecture rtl of top is
begin
  i_ram : entity work.psi_common_tdp_ram
    generic map (
      depth_g => 512,
      width_g => 8
    )
    port map (
      a_clk_i  => clk,
      a_addr_i => addr
    );

  mask <= zeros_vector(8);
end architecture;
";

const SIM_CONFIG: &str = "\
create_tb_run \"psi_common_tdp_ram_tb\"
tb_run_add_arguments -gDepth_g=16 -gWidth_g=4
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "v2/hdl/psi_common_tdp_ram.vhd", OLD_RAM);
    write(dir.path(), "v3/hdl/psi_common_tdp_ram.vhd", NEW_RAM);
    write(dir.path(), "project/hdl/top.vhd", USER);
    write(dir.path(), "project/sim/config.tcl", SIM_CONFIG);
    dir
}

fn build(dir: &Path) -> std::path::PathBuf {
    let db_file = dir.join("rename_db.json");
    commands::build_database(
        &dir.join("v2"),
        &dir.join("v3"),
        &db_file,
        None,
        &Config::default(),
    )
    .unwrap();
    db_file
}

#[test]
fn test_build_database_writes_json() {
    let dir = workspace();
    let db_file = build(dir.path());

    let tables = read_tables(&db_file).unwrap();
    assert_eq!(tables[ALL_SCOPE]["ZerosVector"], "zeros_vector");
    assert_eq!(tables["psi_common_tdp_ram"]["ClkA"], "a_clk_i");
    assert_eq!(tables["psi_common_tdp_ram"]["Depth_g"], "depth_g");

    // Three-space indentation
    let text = fs::read_to_string(&db_file).unwrap();
    assert!(text.starts_with("{\n   \"#ALL#\": {\n      \"ZerosVector\""));
}

#[test]
fn test_build_database_with_seed_file() {
    let dir = workspace();
    write(
        dir.path(),
        "seed.json",
        r##"{"#ALL#": {"OldFunc": "new_func"}}"##,
    );
    let db_file = dir.path().join("rename_db.json");

    let tables = commands::build_database(
        &dir.path().join("v2"),
        &dir.path().join("v3"),
        &db_file,
        Some(&dir.path().join("seed.json")),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(tables[ALL_SCOPE].len(), 1);
    assert_eq!(tables[ALL_SCOPE]["OldFunc"], "new_func");
}

#[test]
fn test_build_database_missing_seed_fails() {
    let dir = workspace();
    let result = commands::build_database(
        &dir.path().join("v2"),
        &dir.path().join("v3"),
        &dir.path().join("rename_db.json"),
        Some(&dir.path().join("absent.json")),
        &Config::default(),
    );

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to read seed table"));
}

#[test]
fn test_refactor_project() {
    let dir = workspace();
    let db_file = build(dir.path());
    let script = dir.path().join("project/sim/config.tcl");

    let stats = commands::refactor(
        &db_file,
        Some(&script),
        &[dir.path().join("project/hdl")],
        &Config::default(),
    )
    .unwrap();

    assert_eq!(stats.files_processed(), 1);
    assert_eq!(stats.files_changed(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("project/hdl/top.vhd")).unwrap(),
        USER_EXPECTED
    );
    assert_eq!(
        fs::read_to_string(&script).unwrap(),
        "create_tb_run \"psi_common_tdp_ram_tb\"\ntb_run_add_arguments -gdepth_g=16 -gwidth_g=4\n"
    );
}

#[test]
fn test_refactor_with_missing_database_fails() {
    let dir = workspace();
    let result = commands::refactor(
        &dir.path().join("absent.json"),
        None,
        &[dir.path().join("project")],
        &Config::default(),
    );

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to load rename database"));
}

#[test]
fn test_refactor_with_empty_database_fails() {
    let dir = workspace();
    write(dir.path(), "empty.json", "{}");

    let result = commands::refactor(
        &dir.path().join("empty.json"),
        None,
        &[dir.path().join("project")],
        &Config::default(),
    );

    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(dir.path().join("project/hdl/top.vhd")).unwrap(),
        USER
    );
}

#[test]
fn test_rewrite_single_pass_to_output() {
    let dir = workspace();
    let db_file = build(dir.path());
    let input = dir.path().join("project/hdl/top.vhd");
    let output = dir.path().join("top.symbols.vhd");

    let changed = commands::rewrite(
        &db_file,
        Pass::Symbols,
        &input,
        Some(&output),
        &Config::default(),
    )
    .unwrap();

    assert!(changed);
    assert_eq!(fs::read_to_string(&input).unwrap(), USER);
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("  mask <= zeros_vector(8);\n"));
}

#[test]
fn test_analyze_prints_declarations() {
    let dir = workspace();
    let json = commands::analyze(&dir.path().join("v2/hdl/psi_common_tdp_ram.vhd")).unwrap();

    assert_eq!(
        json,
        "{\n   \"psi_common_tdp_ram\": {\n      \"Depth_g\": \"Depth_g\",\n      \"Width_g\": \"Width_g\",\n      \"ClkA\": \"ClkA\",\n      \"AddrA\": \"AddrA\"\n   }\n}"
    );
}
