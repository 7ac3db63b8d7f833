//! PDB text builders shared by tests that need real structure files.

use std::fs;
use std::path::Path;

pub(crate) fn atom_line(
    serial: usize,
    name: &str,
    res_name: &str,
    chain: char,
    seq: i32,
    [x, y, z]: [f64; 3],
) -> String {
    let element = name.trim().chars().next().unwrap_or('X');
    format!(
        "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        serial, name, res_name, chain, seq, x, y, z, 1.0, 0.0, element
    )
}

/// One `C3'` atom per `(chain, residue name, position)` entry, residues numbered from 1.
pub(crate) fn c3_prime_pdb(residues: &[(char, &str, [f64; 3])]) -> String {
    let mut lines: Vec<String> = residues
        .iter()
        .enumerate()
        .map(|(i, &(chain, res_name, position))| {
            atom_line(i + 1, " C3'", res_name, chain, i as i32 + 1, position)
        })
        .collect();
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

pub(crate) fn write_c3_prime_pdb(path: &Path, residues: &[(char, &str, [f64; 3])]) {
    fs::write(path, c3_prime_pdb(residues)).unwrap();
}
