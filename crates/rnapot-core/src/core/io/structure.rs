use super::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::nucleotide::Nucleotide;
use nalgebra::Point3;
use pdbtbx::{Format, PDB, ReadOptions, StrictnessLevel};
use phf::{Map, Set, phf_map, phf_set};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Atom names accepted as the representative atom of a residue. `C3*` is the pre-v3 PDB
/// spelling of `C3'`.
static REPRESENTATIVE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "C3'",
    "C3*",
};

static NUCLEOTIDE_RESIDUE_NAMES: Map<&'static str, Nucleotide> = phf_map! {
    "A" => Nucleotide::A,
    "C" => Nucleotide::C,
    "G" => Nucleotide::G,
    "U" => Nucleotide::U,
    "RA" => Nucleotide::A,
    "RC" => Nucleotide::C,
    "RG" => Nucleotide::G,
    "RU" => Nucleotide::U,
};

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse structure: {0}")]
    Parse(String),
    #[error("Unrecognized structure file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Maps a raw residue name to a canonical nucleotide, if it is one.
pub fn nucleotide_for_residue(residue_name: &str) -> Option<Nucleotide> {
    NUCLEOTIDE_RESIDUE_NAMES.get(residue_name.trim()).copied()
}

pub fn is_representative_atom(atom_name: &str) -> bool {
    REPRESENTATIVE_ATOM_NAMES.contains(atom_name.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

impl StructureFormat {
    /// Chooses the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdb" | "ent" => Some(Self::Pdb),
            "cif" | "mmcif" => Some(Self::Mmcif),
            _ => None,
        }
    }

    fn pdbtbx_format(self) -> Format {
        match self {
            Self::Pdb => Format::Pdb,
            Self::Mmcif => Format::Mmcif,
        }
    }
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = StructureError;

    fn read_from(reader: impl Read) -> Result<Vec<AtomRecord>, Self::Error> {
        read_with_format(reader, StructureFormat::Pdb)
    }
}

pub struct MmcifFile;

impl StructureFile for MmcifFile {
    type Error = StructureError;

    fn read_from(reader: impl Read) -> Result<Vec<AtomRecord>, Self::Error> {
        read_with_format(reader, StructureFormat::Mmcif)
    }
}

/// Reads a structure file, dispatching on its extension.
pub fn read_structure(path: &Path) -> Result<Vec<AtomRecord>, StructureError> {
    let format = StructureFormat::from_path(path)
        .ok_or_else(|| StructureError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(?path, ?format, "Reading structure.");
    match format {
        StructureFormat::Pdb => PdbFile::read_from_path(path),
        StructureFormat::Mmcif => MmcifFile::read_from_path(path),
    }
}

fn read_with_format(
    reader: impl Read,
    format: StructureFormat,
) -> Result<Vec<AtomRecord>, StructureError> {
    let (pdb, warnings) = ReadOptions::new()
        .set_format(format.pdbtbx_format())
        .set_level(StrictnessLevel::Loose)
        .read_raw(BufReader::new(reader))
        .map_err(|errors| {
            StructureError::Parse(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

    if !warnings.is_empty() {
        trace!(count = warnings.len(), "Parser reported non-fatal diagnostics.");
    }

    Ok(extract_representative_atoms(&pdb))
}

/// Collects one representative atom per canonical nucleotide residue of the first model.
fn extract_representative_atoms(pdb: &PDB) -> Vec<AtomRecord> {
    let Some(model) = pdb.models().next() else {
        return Vec::new();
    };

    let mut atoms = Vec::new();
    for chain in model.chains() {
        for residue in chain.residues() {
            // Alternate locations: the first conformer wins.
            let Some(conformer) = residue.conformers().next() else {
                continue;
            };
            let Some(nucleotide) = nucleotide_for_residue(conformer.name()) else {
                continue;
            };
            let Some(atom) = conformer
                .atoms()
                .find(|atom| is_representative_atom(atom.name()))
            else {
                continue;
            };

            let (x, y, z) = atom.pos();
            atoms.push(AtomRecord::new(chain.id(), nucleotide, Point3::new(x, y, z)));
        }
    }
    atoms
}
