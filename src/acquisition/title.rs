// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Filename-derived plot titles
//!
//! Trajectory files are named `<molecule>_<count>_<environment>`, e.g.
//! `gly_12_water`. The title rewrites that as `"GLY WATER N=12"`. Filenames
//! that do not match the pattern are used verbatim.

use regex::Regex;

/// Derive a human-readable title from a trajectory file stem
pub fn create_title(filename: &str) -> String {
    // Pattern matches the original naming scheme exactly; \w+ is greedy so a
    // stem like a_b_12_water still resolves the trailing number/environment
    let pattern = Regex::new(r"(\w+)_(\d+)_([a-zA-Z]+)").expect("valid title pattern");

    if let Some(captures) = pattern.captures(filename) {
        let prefix = captures[1].to_uppercase();
        let number = &captures[2];
        let environment = captures[3].to_lowercase();

        let env_label = if environment.contains("water") {
            Some("WATER")
        } else if environment.contains("vac") || environment.contains("vacuum") {
            Some("VACUUM")
        } else if environment.contains("linear") {
            Some("LINEAR")
        } else if environment.contains("cyclic") {
            Some("CYCLIC")
        } else {
            None
        };

        if let Some(env) = env_label {
            return format!("{} {} N={}", prefix, env, number);
        }
    }
    filename.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_for_water_environment() {
        assert_eq!(create_title("gly_12_water"), "GLY WATER N=12");
    }

    #[test]
    fn test_title_for_vacuum_environment() {
        assert_eq!(create_title("ala_8_vac"), "ALA VACUUM N=8");
        assert_eq!(create_title("ala_8_vacuum"), "ALA VACUUM N=8");
    }

    #[test]
    fn test_title_for_chain_topologies() {
        assert_eq!(create_title("pep_4_linear"), "PEP LINEAR N=4");
        assert_eq!(create_title("pep_4_cyclic"), "PEP CYCLIC N=4");
    }

    #[test]
    fn test_unrecognized_filename_passes_through() {
        assert_eq!(create_title("random_name"), "random_name");
        assert_eq!(create_title("mol_3_plasma"), "mol_3_plasma");
    }
}
