//! Rename database construction from two library versions
//!
//! Both library trees are scanned with the [`DeclarationAnalyzer`]. For every
//! component present in both, the old declaration list is paired with the new
//! one to form its rename table. The result starts from a seed table, by
//! default the `#ALL#` renames of the package-level functions and of generics
//! shared by several components.

use crate::analyzer::{DeclarationAnalyzer, DeclarationSets};
use crate::walk::source_files;
use hdlrefactor_core::config::{AnalyzerConfig, MergeStrategy};
use hdlrefactor_core::error::{Error, Result};
use hdlrefactor_core::{RenameTable, ScopeTables, ALL_SCOPE};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// `#ALL#` renames of the v2 to v3 library migration
const DEFAULT_SEED: &[(&str, &str)] = &[
    ("ZerosVector", "zeros_vector"),
    ("OnesVector", "ones_vector"),
    ("PartiallyOnesVector", "partially_ones_vector"),
    ("ShiftLeft", "shift_left"),
    ("ShiftRight", "shift_right"),
    ("BinaryToGray", "binary_to_gray"),
    ("GrayToBinary", "gray_to_binary"),
    ("PpcOr", "ppc_or"),
    ("IntToStdLogic", "int_to_std_logic"),
    ("ReduceOr", "reduce_or"),
    ("ReduceAnd", "reduce_and"),
    ("To01X", "to_01X"),
    ("InvertBitOrder", "invert_bit_order"),
    ("ClockRatioN_g", "clock_ratio_n_g"),
    ("ClockRatioD_g", "clock_ratio_d_g"),
    ("Ratio_g", "ratio_g"),
    ("HandleRdy_g", "handle_rdy_g"),
    ("AxiThrottling_g", "axi_throttling_g"),
    ("UseMem_g", "use_mem_g"),
];

/// Seed table used when none is supplied
pub fn default_seed() -> ScopeTables {
    let all: RenameTable = DEFAULT_SEED
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
    let mut seed = ScopeTables::new();
    seed.insert(ALL_SCOPE.to_string(), all);
    seed
}

/// Pair two declaration lists by position
///
/// Extra names on either side are dropped. A reordered list silently pairs
/// the wrong names.
pub fn merge_positional(old: &RenameTable, new: &RenameTable) -> RenameTable {
    old.keys()
        .zip(new.keys())
        .map(|(from, to)| (from.clone(), to.clone()))
        .collect()
}

/// Pair two declaration lists by name where possible, by position otherwise
///
/// Names are compared lowercased and without underscores (`DataWidth_g` and
/// `data_width_g` match). A pair is only made when that form is unique on
/// both sides. What is left over is paired by position.
pub fn merge_name_aware(old: &RenameTable, new: &RenameTable) -> RenameTable {
    fn normalized(name: &str) -> String {
        name.chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }

    fn unique_forms(names: &RenameTable) -> HashMap<String, Option<&str>> {
        let mut forms: HashMap<String, Option<&str>> = HashMap::new();
        for name in names.keys() {
            forms
                .entry(normalized(name))
                .and_modify(|slot| *slot = None)
                .or_insert(Some(name.as_str()));
        }
        forms
    }

    let old_forms = unique_forms(old);
    let new_forms = unique_forms(new);

    let mut by_name: HashMap<&str, &str> = HashMap::new();
    for (form, old_name) in &old_forms {
        if let (Some(old_name), Some(Some(new_name))) = (old_name, new_forms.get(form)) {
            by_name.insert(*old_name, *new_name);
        }
    }

    let paired_new: Vec<&str> = by_name.values().copied().collect();
    let mut leftover_new = new
        .keys()
        .map(String::as_str)
        .filter(|name| !paired_new.contains(name));

    let mut merged = RenameTable::new();
    for old_name in old.keys() {
        let target = match by_name.get(old_name.as_str()) {
            Some(new_name) => Some(*new_name),
            None => leftover_new.next(),
        };
        if let Some(new_name) = target {
            merged.insert(old_name.clone(), new_name.to_string());
        }
    }
    merged
}

/// Builds persisted rename tables from an old and a new library tree
#[derive(Debug)]
pub struct DatabaseBuilder {
    analyzer: DeclarationAnalyzer,
    pattern: glob::Pattern,
    blacklist: Vec<String>,
    strategy: MergeStrategy,
}

impl DatabaseBuilder {
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let pattern = glob::Pattern::new(&config.library_pattern).map_err(|e| {
            Error::config(format!(
                "Invalid library pattern '{}': {e}",
                config.library_pattern
            ))
        })?;

        Ok(Self {
            analyzer: DeclarationAnalyzer::new()?,
            pattern,
            blacklist: config.blacklist.clone(),
            strategy: config.merge_strategy,
        })
    }

    /// Declarations of every entity found below `root`, blacklisted names removed
    ///
    /// Files are visited in path order; a component declared in several files
    /// keeps the last declaration.
    pub fn collect_declarations(&self, root: &Path) -> Result<DeclarationSets> {
        let mut declarations = DeclarationSets::new();

        for path in source_files(root, &self.pattern)? {
            info!("Parsing {}", path.display());
            for (component, mut names) in self.analyzer.analyze_file(&path)? {
                names.retain(|name, _| !self.blacklist.contains(name));
                declarations.insert(component, names);
            }
        }

        Ok(declarations)
    }

    /// Pair the declarations of two library versions on top of `seed`
    ///
    /// Components only found in the old library keep an identity table.
    /// Components only found in the new library have nothing to rename and
    /// are left out.
    pub fn merge(
        &self,
        seed: ScopeTables,
        old: DeclarationSets,
        new: &DeclarationSets,
    ) -> ScopeTables {
        let mut database = seed;
        for (component, names) in old {
            database.insert(component, names);
        }

        for (component, new_names) in new {
            let Some(old_names) = database.get(component) else {
                debug!("{component} is new, nothing to rename");
                continue;
            };

            if old_names.len() != new_names.len() {
                warn!(
                    "{component}: {} old declarations against {} new ones, unmatched names are dropped",
                    old_names.len(),
                    new_names.len()
                );
            }

            let merged = match self.strategy {
                MergeStrategy::Positional => merge_positional(old_names, new_names),
                MergeStrategy::NameAware => merge_name_aware(old_names, new_names),
            };
            debug!("{component}: {} renames", merged.len());
            database.insert(component.clone(), merged);
        }

        database
    }

    /// Scan both trees and merge them on top of `seed`
    pub fn build(&self, old_root: &Path, new_root: &Path, seed: ScopeTables) -> Result<ScopeTables> {
        let old = self.collect_declarations(old_root)?;
        let new = self.collect_declarations(new_root)?;
        Ok(self.merge(seed, old, &new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(names: &[&str]) -> RenameTable {
        names
            .iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect()
    }

    fn pairs(merged: &RenameTable) -> Vec<(&str, &str)> {
        merged
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect()
    }

    #[test]
    fn test_positional_pairs_by_index() {
        let old = table(&["Clk", "Rst", "InData"]);
        let new = table(&["clk_i", "rst_i", "dat_i"]);

        assert_eq!(
            pairs(&merge_positional(&old, &new)),
            vec![("Clk", "clk_i"), ("Rst", "rst_i"), ("InData", "dat_i")]
        );
    }

    #[test]
    fn test_positional_mispairs_reordered_lists() {
        let old = table(&["Width_g", "Depth_g"]);
        let new = table(&["depth_g", "width_g"]);

        assert_eq!(
            pairs(&merge_positional(&old, &new)),
            vec![("Width_g", "depth_g"), ("Depth_g", "width_g")]
        );
    }

    #[test]
    fn test_positional_truncates_to_shorter_list() {
        let old = table(&["A", "B", "C"]);
        let new = table(&["a", "b"]);

        assert_eq!(merge_positional(&old, &new).len(), 2);
    }

    #[test]
    fn test_name_aware_handles_reordering() {
        let old = table(&["Width_g", "Depth_g", "Clk", "InVld"]);
        let new = table(&["depth_g", "width_g", "clk_i", "in_valid_i"]);

        assert_eq!(
            pairs(&merge_name_aware(&old, &new)),
            vec![
                ("Width_g", "width_g"),
                ("Depth_g", "depth_g"),
                ("Clk", "clk_i"),
                ("InVld", "in_valid_i"),
            ]
        );
    }

    #[test]
    fn test_name_aware_ambiguous_falls_back_to_position() {
        // "a_b" and "ab" normalize to the same form on the new side
        let old = table(&["AB", "Other"]);
        let new = table(&["a_b", "ab"]);

        assert_eq!(
            pairs(&merge_name_aware(&old, &new)),
            vec![("AB", "a_b"), ("Other", "ab")]
        );
    }

    #[test]
    fn test_merge_on_seed() {
        let builder = DatabaseBuilder::new(&AnalyzerConfig::default()).unwrap();

        let mut old = DeclarationSets::new();
        old.insert("psi_common_foo".to_string(), table(&["Clk", "Rst"]));
        old.insert("psi_common_gone".to_string(), table(&["X"]));
        let mut new = DeclarationSets::new();
        new.insert("psi_common_foo".to_string(), table(&["clk_i", "rst_i"]));
        new.insert("psi_common_added".to_string(), table(&["y_i"]));

        let database = builder.merge(default_seed(), old, &new);

        assert_eq!(
            database.keys().collect::<Vec<_>>(),
            vec![ALL_SCOPE, "psi_common_foo", "psi_common_gone"]
        );
        assert_eq!(database[ALL_SCOPE]["ShiftLeft"], "shift_left");
        assert_eq!(
            pairs(&database["psi_common_foo"]),
            vec![("Clk", "clk_i"), ("Rst", "rst_i")]
        );
        assert_eq!(pairs(&database["psi_common_gone"]), vec![("X", "X")]);
    }

    #[test]
    fn test_default_seed() {
        let seed = default_seed();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[ALL_SCOPE].len(), 19);
        assert_eq!(seed[ALL_SCOPE]["To01X"], "to_01X");
    }

    #[test]
    fn test_invalid_library_pattern() {
        let config = AnalyzerConfig {
            library_pattern: "[".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(DatabaseBuilder::new(&config).is_err());
    }
}
