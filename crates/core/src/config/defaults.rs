//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_CONFIG_FILE: &str = "hdlrefactor.toml";
pub(crate) const DEFAULT_TB_SUFFIX: &str = "_tb";
pub(crate) const DEFAULT_LIBRARY_PATTERN: &str = "*.vhd";
pub(crate) const DEFAULT_SOURCE_PATTERN: &str = "*.vhd*";

/// Test-bench packages and test cases whose names do not follow the
/// `<component>_tb` convention, mapped to the scope they share symbols with.
///
/// Order matters: the `_tb_pkg` scopes are created first so the test cases
/// can point at them.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    (
        "psi_common_axi_master_simple_tb_pkg",
        "psi_common_axi_master_simple_tb",
    ),
    (
        "psi_common_axi_master_full_tb_pkg",
        "psi_common_axi_master_full_tb",
    ),
    (
        "psi_common_axi_master_simple_tb_case_simple_tf",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_simple_tb_case_axi_hs",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_simple_tb_case_internals",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_simple_tb_case_max_transact",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_simple_tb_case_special",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_simple_tb_case_split",
        "psi_common_axi_master_simple_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_simple_tf",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_axi_hs",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_user_hs",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_internals",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_max_transact",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_full_tf",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_special",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_split",
        "psi_common_axi_master_full_tb_pkg",
    ),
    (
        "psi_common_axi_master_full_tb_case_large",
        "psi_common_axi_master_full_tb_pkg",
    ),
];

pub(crate) fn default_fix_case() -> bool {
    true
}

pub(crate) fn default_add_tb_variants() -> bool {
    true
}

pub(crate) fn default_tb_suffix() -> String {
    DEFAULT_TB_SUFFIX.to_string()
}

pub(crate) fn default_aliases() -> Vec<super::ScopeAlias> {
    DEFAULT_ALIASES
        .iter()
        .map(|(alias, target)| super::ScopeAlias::new(*alias, *target))
        .collect()
}

pub(crate) fn default_blacklist() -> Vec<String> {
    vec!["rst_pol_g".to_string()]
}

pub(crate) fn default_library_pattern() -> String {
    DEFAULT_LIBRARY_PATTERN.to_string()
}

pub(crate) fn default_source_pattern() -> String {
    DEFAULT_SOURCE_PATTERN.to_string()
}
